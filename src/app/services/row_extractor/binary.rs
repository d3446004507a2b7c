//! Binary spreadsheet row extraction
//!
//! Delegates to the spreadsheet codec for the first worksheet and renders
//! its typed cells to text. Some station firmwares prepend a title row above
//! the two header rows, so the data boundary is located by content: the
//! first row whose leading cell parses as a timestamp starts the data
//! section, and the one or two rows immediately above it are the headers.

use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use tracing::{debug, warn};

use crate::app::models::{HeaderDepth, RawTable};
use crate::app::services::schema_normalizer::parse_timestamp;
use crate::config::IngestConfig;
use crate::constants::{FORMAT_BINARY, SPREADSHEET_HEADER_ROWS};
use crate::{Error, Result};

/// Extract a raw table from binary spreadsheet bytes
pub fn extract(bytes: &[u8], config: &IngestConfig) -> Result<RawTable> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
        Error::format_with_source(FORMAT_BINARY, "failed to open workbook", Box::new(e))
    })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| Error::format(FORMAT_BINARY, "workbook has no sheets"))?;

    let range = workbook.worksheet_range(&sheet_name).map_err(|e| {
        Error::format_with_source(
            FORMAT_BINARY,
            format!("failed to read sheet '{}'", sheet_name),
            Box::new(e),
        )
    })?;

    let rows: Vec<Vec<Option<String>>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_text).collect())
        .collect();

    debug!(
        "Extracted {} rows from sheet '{}' before header detection",
        rows.len(),
        sheet_name
    );

    split_at_data_boundary(rows, config.header_scan_rows)
}

/// Render one typed codec cell to the text shape the normalizer coerces.
/// Spreadsheet-native datetimes are rendered in the canonical timestamp
/// layout so they survive the coercion step.
pub(crate) fn cell_to_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(v) => Some(v.to_string()),
        Data::Int(v) => Some(v.to_string()),
        Data::Bool(v) => Some(v.to_string()),
        Data::DateTime(v) => v
            .as_datetime()
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string()),
        Data::DateTimeIso(s) => Some(s.trim().to_string()),
        Data::DurationIso(s) => Some(s.trim().to_string()),
        Data::Error(_) => None,
    }
}

/// Locate the first data row by sniffing the leading cell for a timestamp
/// and keep the one or two rows above it as headers. Title rows further up
/// are discarded. When no boundary is found within the scan depth the
/// two-header layout is assumed, matching the sibling markup format.
pub(crate) fn split_at_data_boundary(
    rows: Vec<Vec<Option<String>>>,
    scan_rows: usize,
) -> Result<RawTable> {
    if rows.is_empty() {
        return Err(Error::format(FORMAT_BINARY, "worksheet contains no rows"));
    }

    let boundary = rows
        .iter()
        .take(scan_rows)
        .position(|row| leading_cell_is_timestamp(row));

    match boundary {
        Some(0) => Err(Error::format(
            FORMAT_BINARY,
            "no header rows precede the data section",
        )),
        Some(1) => Ok(RawTable {
            rows,
            header_depth: HeaderDepth::Single,
        }),
        Some(boundary) => {
            let skip = boundary - SPREADSHEET_HEADER_ROWS;
            if skip > 0 {
                debug!("Skipping {} title row(s) above the headers", skip);
            }
            Ok(RawTable {
                rows: rows[skip..].to_vec(),
                header_depth: HeaderDepth::Double,
            })
        }
        None => {
            warn!(
                "No timestamp-led data row within the first {} rows; assuming {} header rows",
                scan_rows, SPREADSHEET_HEADER_ROWS
            );
            Ok(RawTable {
                rows,
                header_depth: HeaderDepth::Double,
            })
        }
    }
}

fn leading_cell_is_timestamp(row: &[Option<String>]) -> bool {
    row.first()
        .and_then(|cell| cell.as_deref())
        .is_some_and(|text| parse_timestamp(text).is_some())
}
