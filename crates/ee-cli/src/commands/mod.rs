//! CLI subcommand implementations.

pub mod dump;
pub mod estimate;

use std::io::BufRead;

use ee_core::Store;

/// Ingests every record `reader` yields before the stream ends.
///
/// A read failure is logged rather than returned, so callers always get the
/// records accepted up to that point.
pub fn load_store<R: BufRead>(reader: R) -> Store {
    let mut store = Store::new();
    match ee_core::ingest(reader, &mut store) {
        Ok(summary) => {
            tracing::debug!(
                records = summary.records_stored,
                duplicates = summary.duplicates,
                rejected = summary.rejected,
                "loaded records"
            );
        }
        Err(err) => {
            tracing::error!(
                error = %err,
                records = store.len(),
                "input read failed, continuing with records parsed so far"
            );
        }
    }
    store
}
