//! Ingestion pipeline: lines → tokens → records → store.

use std::io::{self, BufRead};

use thiserror::Error;

use crate::parser::{Pending, RecordParser};
use crate::reassembler::Reassembler;
use crate::store::Store;

/// Fatal ingestion errors.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The input stream could not be read. Records accepted before the
    /// failure remain in the store.
    #[error("failed to read input at line {line}")]
    Read {
        line: usize,
        #[source]
        source: io::Error,
    },
}

/// Summary of an ingestion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestSummary {
    /// Physical lines consumed.
    pub lines_read: usize,
    /// Records stored.
    pub records_stored: usize,
    /// Records dropped because their timestamp was already stored.
    pub duplicates: usize,
    /// Malformed buffers discarded.
    pub rejected: usize,
    /// Whether the stream ended with a sentinel or an empty prompt, rather
    /// than by running out of input.
    pub terminated: bool,
}

/// Reads records from `reader` into `store` until the stream ends.
///
/// Malformed records are logged and skipped. A read failure stops ingestion
/// and is returned; everything parsed before it stays in `store`.
pub fn ingest<R: BufRead>(reader: R, store: &mut Store) -> Result<IngestSummary, IngestError> {
    let mut reassembler = Reassembler::new();
    let mut parser = RecordParser::new();
    let mut summary = IngestSummary::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| IngestError::Read {
            line: index + 1,
            source,
        })?;

        for token in reassembler.feed_line(&line, parser.has_pending()) {
            match parser.feed(token) {
                Ok(Some(record)) => {
                    if store.put(record) {
                        summary.records_stored += 1;
                    } else {
                        summary.duplicates += 1;
                    }
                }
                Ok(None) => {}
                Err(err) => {
                    tracing::warn!(line = index + 1, error = %err, "discarding malformed record");
                    summary.rejected += 1;
                }
            }
        }

        if reassembler.is_ended() {
            break;
        }
    }

    summary.lines_read = reassembler.lines_read();
    summary.terminated = reassembler.is_ended();

    let leftover = parser.finish();
    if leftover != Pending::Empty {
        tracing::debug!(?leftover, "discarding incomplete record at end of stream");
    }

    tracing::debug!(?summary, "ingestion finished");
    Ok(summary)
}
