//! Ingestion pipeline: raw CSV bytes to a recorded summary.
//!
//! One call runs the whole chain: parse → normalize headers → validate →
//! aggregate → record history. No step after a failure executes, so a failed
//! ingestion never leaves a partial history entry behind.

use std::io::Read;

use chrono::Utc;
use encoding_rs::Encoding;
use log::{debug, info};

use crate::{
    error::IngestError,
    history::{HistoryEntry, HistoryStore},
    io_utils,
    normalize::normalize_headers,
    summary::{self, Summary},
    validate::{ColumnLayout, validate_rows},
};

/// Ingests one dataset and records it in the history store.
///
/// `filename` is display metadata carried into the history entry; it does
/// not have to correspond to a real path (stdin uploads pass a label).
pub fn ingest<R: Read>(
    reader: R,
    filename: &str,
    delimiter: u8,
    encoding: &'static Encoding,
    store: &mut HistoryStore,
) -> Result<Summary, IngestError> {
    let summary = summarize(reader, delimiter, encoding)?;
    let entry = HistoryEntry {
        filename: filename.to_string(),
        uploaded_at: Utc::now(),
        summary: summary.clone(),
    };
    store.record(entry)?;
    info!(
        "Ingested '{filename}': {} equipment row(s), {} type(s)",
        summary.total_equipment,
        summary.type_distribution.len()
    );
    Ok(summary)
}

/// Parses, validates, and aggregates without touching history. The `ingest`
/// entry point layers history recording on top; callers that only want the
/// numbers (previews, exports of a file not yet uploaded) use this directly.
pub fn summarize<R: Read>(
    reader: R,
    delimiter: u8,
    encoding: &'static Encoding,
) -> Result<Summary, IngestError> {
    let mut csv_reader = io_utils::open_csv_reader(reader, delimiter);

    let raw_headers = csv_reader
        .byte_headers()
        .map_err(|err| IngestError::Format(err.to_string()))?
        .clone();
    let headers = normalize_headers(&io_utils::decode_record(&raw_headers, encoding)?);
    debug!("Normalized headers: {headers:?}");
    let layout = ColumnLayout::resolve(&headers)?;

    let mut rows = Vec::new();
    for record in csv_reader.byte_records() {
        let record = record.map_err(|err| IngestError::Format(err.to_string()))?;
        rows.push(io_utils::decode_record(&record, encoding)?);
    }

    let records = validate_rows(&layout, &rows)?;
    summary::aggregate(&records)
}
