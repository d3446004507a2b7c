//! Delimited-text row extraction
//!
//! The simplest of the three physical formats: one header row, then data
//! rows verbatim. The reader runs in flexible mode because station writers
//! drop trailing empty cells; width repair belongs to the normalizer, not
//! here.

use tracing::debug;

use super::cell_from_text;
use super::strip_utf8_bom;
use crate::app::models::{HeaderDepth, RawTable};
use crate::config::IngestConfig;
use crate::constants::FORMAT_DELIMITED;
use crate::{Error, Result};

/// Extract a raw table from delimited text
pub fn extract(bytes: &[u8], config: &IngestConfig) -> Result<RawTable> {
    let bytes = strip_utf8_bom(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(config.delimiter)
        .from_reader(bytes);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| {
            Error::format_with_source(
                FORMAT_DELIMITED,
                format!("malformed record at line {}", rows.len() + 1),
                Box::new(e),
            )
        })?;

        rows.push(record.iter().map(cell_from_text).collect());
    }

    if rows.is_empty() {
        return Err(Error::format(FORMAT_DELIMITED, "input contains no rows"));
    }

    debug!("Extracted {} delimited rows (1 header row)", rows.len());

    Ok(RawTable {
        rows,
        header_depth: HeaderDepth::Single,
    })
}
