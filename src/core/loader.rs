//! Record loader: pairs the header row of a two-row CSV source with its value row.

use crate::domain::model::{RawRecord, DESCRIPTION_FIELD};
use crate::utils::error::{EtlError, Result};
use std::io::Read;

/// Reads the first two rows of `reader` and zips them column by column.
///
/// Rows past the second are ignored, and ragged rows pair up to the shorter one.
pub fn load_record<R: Read>(source_name: &str, reader: R) -> Result<RawRecord> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = csv_reader.records();

    let key_row = match rows.next() {
        Some(row) => row?,
        None => return Err(EtlError::malformed(source_name, "expected 2 rows, found 0")),
    };
    let value_row = match rows.next() {
        Some(row) => row?,
        None => return Err(EtlError::malformed(source_name, "expected 2 rows, found 1")),
    };

    if key_row.len() != value_row.len() {
        tracing::debug!(
            "{}: header has {} columns but value row has {}",
            source_name,
            key_row.len(),
            value_row.len()
        );
    }

    Ok(key_row.iter().zip(value_row.iter()).collect())
}

pub fn load_record_from_bytes(source_name: &str, data: &[u8]) -> Result<RawRecord> {
    load_record(source_name, data)
}

impl RawRecord {
    /// Removes the description column, leaving only day and range fields behind.
    pub fn take_description(&mut self, source_name: &str) -> Result<String> {
        self.remove(DESCRIPTION_FIELD).ok_or_else(|| {
            EtlError::malformed(
                source_name,
                format!("missing '{}' column", DESCRIPTION_FIELD),
            )
        })
    }
}
