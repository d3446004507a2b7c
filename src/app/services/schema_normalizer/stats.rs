//! Normalization diagnostics
//!
//! Cell coercion is silent by contract: unparsable cells become nulls that
//! the aggregate queries skip. The gaps are counted here instead of
//! being dropped invisibly.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Diagnostics accumulated while normalizing one table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NormalizeStats {
    /// Data rows received from the extractor
    pub rows_in: usize,

    /// Rows padded on the right to reach the header width
    pub padded_rows: usize,

    /// Rows truncated on the right to the header width
    pub truncated_rows: usize,

    /// Columns removed because every data cell was null
    pub dropped_columns: Vec<String>,

    /// Null cells per surviving value column, counting both absent source
    /// cells and failed numeric coercions
    pub null_counts: HashMap<String, usize>,

    /// Timestamp cells that were absent or failed to parse
    pub timestamp_gaps: usize,

    /// Timestamps that step backwards relative to the preceding row.
    /// The series is kept in source order; this only flags the anomaly.
    pub out_of_order_timestamps: usize,
}

impl NormalizeStats {
    /// Create empty diagnostics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one null cell for a named column
    pub fn record_null(&mut self, column: &str) {
        *self.null_counts.entry(column.to_string()).or_insert(0) += 1;
    }

    /// Total null cells across all value columns
    pub fn cell_gap_total(&self) -> usize {
        self.null_counts.values().sum()
    }

    /// Whether normalization saw no gaps, repairs, or anomalies at all
    pub fn is_clean(&self) -> bool {
        self.padded_rows == 0
            && self.truncated_rows == 0
            && self.dropped_columns.is_empty()
            && self.cell_gap_total() == 0
            && self.timestamp_gaps == 0
            && self.out_of_order_timestamps == 0
    }
}
