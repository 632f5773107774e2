use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ee_cli::commands::{dump, estimate};
use ee_cli::{Cli, Commands, Config};

/// Opens the event source: a file, or stdin when absent or `-`.
fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries only the result.
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = Config::load_from(cli.config.as_deref(), cli.power_watts)
        .context("failed to load configuration")?;
    config.validate()?;
    tracing::debug!(?config, "loaded configuration");

    let input = open_input(cli.input.as_deref())?;
    let mut stdout = io::stdout().lock();

    match &cli.command {
        None | Some(Commands::Estimate) => {
            estimate::run(input, &mut stdout, &config.estimate_config())?;
        }
        Some(Commands::Dump { json }) => {
            dump::run(input, &mut stdout, *json)?;
        }
    }

    Ok(())
}
