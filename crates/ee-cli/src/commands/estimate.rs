//! Estimate command: prints the energy used by the light.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};

use ee_core::{EstimateConfig, estimate_energy};

use super::load_store;

/// Reads events and writes the estimate, without a trailing newline.
pub fn run<R: BufRead, W: Write>(reader: R, writer: &mut W, config: &EstimateConfig) -> Result<()> {
    let store = load_store(reader);
    let estimate = estimate_energy(&store, config);

    write!(writer, "Estimated energy used: {} Wh", estimate.watt_hours)
        .context("failed to write estimate")?;
    writer.flush().context("failed to flush output")?;
    Ok(())
}
