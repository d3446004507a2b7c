//! Format-specific row extraction
//!
//! Each physical format gets a dedicated reader producing the same raw
//! shape: a [`RawTable`](crate::app::models::RawTable) of header-candidate
//! rows followed by ragged data rows of optional text cells. Extractors are
//! pure functions over one classified format: the sniffer decides once, and
//! a structural failure here is final for the file, never retried against
//! another format.
//!
//! ## Components
//!
//! - [`delimited`] - delimited text, single header row
//! - [`markup`] - SpreadsheetML markup, two header rows
//! - [`binary`] - binary spreadsheet workbooks via the codec

pub mod binary;
pub mod delimited;
pub mod markup;

#[cfg(test)]
pub mod tests;

use crate::app::models::{InputFormat, RawTable};
use crate::config::IngestConfig;
use crate::constants::UTF8_BOM;
use crate::Result;

/// Extract raw rows from the input bytes using the committed format
pub fn extract(format: InputFormat, bytes: &[u8], config: &IngestConfig) -> Result<RawTable> {
    match format {
        InputFormat::DelimitedText => delimited::extract(bytes, config),
        InputFormat::MarkupSpreadsheet => markup::extract(bytes),
        InputFormat::BinarySpreadsheet => binary::extract(bytes, config),
    }
}

/// Strip a UTF-8 byte-order mark some station exports prepend
pub(crate) fn strip_utf8_bom(bytes: &[u8]) -> &[u8] {
    bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes)
}

/// Normalize one raw text cell: trimmed, with empty text collapsed to null
pub(crate) fn cell_from_text(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
