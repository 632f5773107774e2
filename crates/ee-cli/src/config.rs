//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use ee_core::{DEFAULT_POWER_WATTS, DEFAULT_PRECISION, EstimateConfig};

/// Largest supported rounding precision.
const MAX_PRECISION: u32 = 9;

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Power draw of the light at full brightness, in watts.
    pub power_watts: f64,
    /// Decimal places in the reported estimate.
    pub precision: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            power_watts: DEFAULT_POWER_WATTS,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file, with an optional
    /// power override taking precedence over every other source.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(
        config_path: Option<&Path>,
        power_watts: Option<f64>,
    ) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (EE_*)
        figment = figment.merge(Env::prefixed("EE_"));

        if let Some(watts) = power_watts {
            figment = figment.merge(Serialized::default("power_watts", watts));
        }

        figment.extract()
    }

    /// Rejects values the estimator cannot use.
    pub fn validate(&self) -> Result<()> {
        if !self.power_watts.is_finite() || self.power_watts < 0.0 {
            bail!(
                "power_watts must be a non-negative number, got {}",
                self.power_watts
            );
        }
        if self.precision > MAX_PRECISION {
            bail!(
                "precision must be at most {MAX_PRECISION}, got {}",
                self.precision
            );
        }
        Ok(())
    }

    pub const fn estimate_config(&self) -> EstimateConfig {
        EstimateConfig {
            power_watts: self.power_watts,
            precision: self.precision,
        }
    }
}

/// Returns the platform-specific config directory for the estimator.
///
/// On Linux: `~/.config/energy-estimator`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("energy-estimator"))
}
