//! Test fixtures shared across the schema normalizer test modules


use crate::app::models::{HeaderDepth, RawTable};

/// Build a raw table from string literals; empty strings become null cells
pub fn raw_table(rows: &[&[&str]], header_depth: HeaderDepth) -> RawTable {
    RawTable {
        rows: rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| {
                        if cell.is_empty() {
                            None
                        } else {
                            Some(cell.to_string())
                        }
                    })
                    .collect()
            })
            .collect(),
        header_depth,
    }
}
