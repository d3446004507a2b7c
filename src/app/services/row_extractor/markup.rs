//! SpreadsheetML markup row extraction
//!
//! Walks the nested worksheet → table → row → cell → data hierarchy of the
//! legacy markup export and flattens it into a raw table. A cell with no
//! data element yields a null. The format stores two header rows (instrument
//! label, measurement-unit label) above the first real data row.
//!
//! Only the first table is read; station exports carry exactly one, and any
//! trailing worksheets are vendor summary sheets with no observations.

use quick_xml::Reader;
use quick_xml::events::Event;
use tracing::debug;

use super::cell_from_text;
use super::strip_utf8_bom;
use crate::app::models::{HeaderDepth, RawTable};
use crate::constants::{FORMAT_MARKUP, markup_elements};
use crate::{Error, Result};

/// Extract a raw table from SpreadsheetML markup bytes
pub fn extract(bytes: &[u8]) -> Result<RawTable> {
    let bytes = strip_utf8_bom(bytes);
    let mut reader = Reader::from_reader(bytes);

    let mut rows: Vec<Vec<Option<String>>> = Vec::new();
    let mut current_row: Option<Vec<Option<String>>> = None;
    let mut in_table = false;
    let mut saw_table = false;
    let mut in_cell = false;
    let mut in_data = false;
    let mut cell_data: Option<String> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => match e.local_name().as_ref() {
                name if name == markup_elements::TABLE.as_bytes() && !saw_table => {
                    in_table = true;
                    saw_table = true;
                }
                name if name == markup_elements::ROW.as_bytes() && in_table => {
                    current_row = Some(Vec::new());
                }
                name if name == markup_elements::CELL.as_bytes() && current_row.is_some() => {
                    in_cell = true;
                    cell_data = None;
                }
                name if name == markup_elements::DATA.as_bytes() && in_cell => {
                    in_data = true;
                    cell_data = Some(String::new());
                }
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.local_name().as_ref() {
                // Self-closing <Cell/> carries no data element
                name if name == markup_elements::CELL.as_bytes() => {
                    if let Some(row) = current_row.as_mut() {
                        row.push(None);
                    }
                }
                name if name == markup_elements::DATA.as_bytes() && in_cell => {
                    cell_data = Some(String::new());
                }
                _ => {}
            },
            Ok(Event::Text(t)) if in_data => {
                let text = t.unescape().map_err(|e| {
                    Error::format_with_source(
                        FORMAT_MARKUP,
                        format!("unreadable cell text in row {}", rows.len() + 1),
                        Box::new(e),
                    )
                })?;
                if let Some(data) = cell_data.as_mut() {
                    data.push_str(&text);
                }
            }
            Ok(Event::End(e)) => match e.local_name().as_ref() {
                name if name == markup_elements::DATA.as_bytes() => {
                    in_data = false;
                }
                name if name == markup_elements::CELL.as_bytes() && in_cell => {
                    if let Some(row) = current_row.as_mut() {
                        row.push(cell_data.take().and_then(|text| cell_from_text(&text)));
                    }
                    in_cell = false;
                }
                name if name == markup_elements::ROW.as_bytes() => {
                    if let Some(row) = current_row.take() {
                        rows.push(row);
                    }
                }
                name if name == markup_elements::TABLE.as_bytes() && in_table => {
                    // One table per export; stop walking
                    break;
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(Error::format_with_source(
                    FORMAT_MARKUP,
                    format!(
                        "markup parse failed at byte offset {}",
                        reader.buffer_position()
                    ),
                    Box::new(e),
                ));
            }
        }
        buf.clear();
    }

    if !saw_table {
        return Err(Error::format(
            FORMAT_MARKUP,
            format!("no {} element found", markup_elements::TABLE),
        ));
    }

    debug!(
        "Extracted {} markup rows ({} header rows)",
        rows.len(),
        HeaderDepth::Double.rows()
    );

    Ok(RawTable {
        rows,
        header_depth: HeaderDepth::Double,
    })
}
