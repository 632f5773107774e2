//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Dimmable light energy estimator.
///
/// Reads `TurnOff` / `Delta` events for a single light and estimates the
/// energy it used, in watt-hours.
#[derive(Debug, Parser)]
#[command(name = "energy-estimator", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to config file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Read events from a file instead of stdin (`-` for stdin).
    #[arg(short, long, global = true)]
    pub input: Option<PathBuf>,

    /// Power draw at full brightness, in watts.
    #[arg(long, global = true)]
    pub power_watts: Option<f64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Estimate energy used (the default).
    Estimate,

    /// Print the parsed records in timestamp order.
    Dump {
        /// Output one JSON object per line.
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_subcommand_means_estimate() {
        let cli = Cli::parse_from(["energy-estimator"]);
        assert!(cli.command.is_none());
        assert!(cli.power_watts.is_none());
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::parse_from(["energy-estimator", "dump", "--json", "--power-watts", "60"]);
        assert!(matches!(cli.command, Some(Commands::Dump { json: true })));
        assert_eq!(cli.power_watts, Some(60.0));
    }
}
