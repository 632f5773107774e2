//! Energy estimation by integrating the dimmer level over time.
//!
//! # Algorithm Summary
//!
//! 1. Walk records in timestamp order, starting from the second one
//! 2. Add each record's delta to the running dimmer level, clamped to `[0, 1]`
//! 3. Charge `dimmer * power * hours` for the interval until the next record
//!
//! The span between the first and second record is never charged: the light
//! is assumed off until its first adjustment, and the first record's own
//! delta is never applied. The last record only closes the final interval.

use serde::{Deserialize, Serialize};

use crate::record::Record;

/// Power draw of the light at full brightness, in watts.
pub const DEFAULT_POWER_WATTS: f64 = 5.0;

/// Decimal places the estimate is rounded to.
pub const DEFAULT_PRECISION: u32 = 3;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Configuration for energy estimation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EstimateConfig {
    /// Power draw at dimmer level `1.0`, in watts.
    /// Default: 5.0.
    pub power_watts: f64,

    /// Decimal places kept in the reported estimate.
    /// Default: 3.
    pub precision: u32,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            power_watts: DEFAULT_POWER_WATTS,
            precision: DEFAULT_PRECISION,
        }
    }
}

/// Result of an energy estimation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnergyEstimate {
    /// Estimated consumption in watt-hours, rounded to the configured precision.
    pub watt_hours: f64,

    /// Number of intervals that were integrated.
    pub intervals: usize,

    /// Dimmer level in effect during the last integrated interval.
    pub final_dimmer: f64,
}

/// Clamps a dimmer level into `[0.0, 1.0]`.
pub fn clamp_dimmer(level: f64) -> f64 {
    level.clamp(0.0, 1.0)
}

/// Estimates energy use over records sorted by ascending timestamp.
///
/// Fewer than three records yield an estimate of exactly `0.0`.
pub fn estimate_energy<'a, I>(records: I, config: &EstimateConfig) -> EnergyEstimate
where
    I: IntoIterator<Item = &'a Record>,
{
    let records: Vec<&Record> = records.into_iter().collect();

    let mut dimmer = 0.0;
    let mut total = 0.0;
    let mut intervals = 0;

    for pair in records.windows(2).skip(1) {
        let (current, next) = (pair[0], pair[1]);

        dimmer = clamp_dimmer(dimmer + current.dimmer_delta());
        total += dimmer * config.power_watts * elapsed_hours(current.timestamp, next.timestamp);
        intervals += 1;
    }

    tracing::debug!(
        records = records.len(),
        intervals,
        unrounded_wh = total,
        "estimated energy"
    );

    EnergyEstimate {
        watt_hours: round_to(total, config.precision),
        intervals,
        final_dimmer: dimmer,
    }
}

/// Hours between two timestamps. Widened so any pair of `i64` values fits.
#[expect(
    clippy::cast_precision_loss,
    reason = "sub-second precision is irrelevant for intervals past 2^53 seconds"
)]
fn elapsed_hours(from: i64, to: i64) -> f64 {
    (i128::from(to) - i128::from(from)) as f64 / SECONDS_PER_HOUR
}

/// Rounds half away from zero to `precision` decimal places.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let scale = 10_f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    (value * scale).round() / scale
}
