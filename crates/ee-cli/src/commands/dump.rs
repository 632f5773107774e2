//! Dump command: lists parsed records in timestamp order.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use chrono::{DateTime, SecondsFormat};

use ee_core::{Action, Record};

use super::load_store;

pub fn run<R: BufRead, W: Write>(reader: R, writer: &mut W, json: bool) -> Result<()> {
    let store = load_store(reader);

    for record in &store {
        if json {
            let line = serde_json::to_string(record).context("failed to serialize record")?;
            writeln!(writer, "{line}")?;
        } else {
            writeln!(writer, "{}", format_record(record))?;
        }
    }

    writer.flush().context("failed to flush output")?;
    Ok(())
}

/// Renders a record as `<epoch> <RFC 3339 UTC> <action> [delta]`.
fn format_record(record: &Record) -> String {
    let when = DateTime::from_timestamp(record.timestamp, 0).map_or_else(
        || "-".to_string(),
        |dt| dt.to_rfc3339_opts(SecondsFormat::Secs, true),
    );
    match record.action {
        Action::TurnOff => format!("{} {when} {}", record.timestamp, record.kind()),
        Action::Delta { delta } => {
            format!("{} {when} {} {delta:+}", record.timestamp, record.kind())
        }
    }
}
