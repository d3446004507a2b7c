//! Two-tier header reconciliation
//!
//! The spreadsheet formats label each column twice: an instrument row
//! ("HC Air temperature [°C]") above a measurement-unit row ("avg"). Merged
//! names take the `"{instrument} ({unit})"` shape the downstream column
//! contract expects. Position 0 is always renamed to the canonical
//! timestamp column regardless of its original label.

use crate::app::models::ColumnSpec;
use crate::constants::columns;
use crate::{Error, Result};

/// Merge one column's two header cells into a display name.
///
/// Precedence: both present ⇒ `"{row1} ({row2})"`; row 1 blank ⇒ row 2
/// alone; row 2 blank ⇒ row 1 alone, never a rendered placeholder like
/// `"{row1} (None)"`.
pub fn merge_cell(row1: Option<&str>, row2: Option<&str>) -> String {
    match (non_empty(row1), non_empty(row2)) {
        (Some(instrument), Some(unit)) => format!("{} ({})", instrument, unit),
        (Some(instrument), None) => instrument.to_string(),
        (None, Some(unit)) => unit.to_string(),
        (None, None) => String::new(),
    }
}

/// Build column specs from the header candidate rows (one or two).
///
/// A table with no columns at all means the timestamp column cannot be
/// identified, which is the one structural failure normalization refuses
/// to paper over.
pub fn column_specs(header_rows: &[Vec<Option<String>>]) -> Result<Vec<ColumnSpec>> {
    let width = header_rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return Err(Error::schema(
            "table has no columns; the timestamp column cannot be identified",
        ));
    }

    let mut specs = Vec::with_capacity(width);
    for index in 0..width {
        let name = if index == 0 {
            columns::DATE_TIME.to_string()
        } else {
            match header_rows {
                [single] => cell_at(single, index).unwrap_or_default().to_string(),
                [row1, row2, ..] => merge_cell(cell_at(row1, index), cell_at(row2, index)),
                [] => unreachable!("width > 0 implies at least one header row"),
            }
        };

        specs.push(ColumnSpec { name, index });
    }

    Ok(specs)
}

fn cell_at(row: &[Option<String>], index: usize) -> Option<&str> {
    row.get(index).and_then(|cell| cell.as_deref())
}

fn non_empty(cell: Option<&str>) -> Option<&str> {
    cell.map(str::trim).filter(|text| !text.is_empty())
}
