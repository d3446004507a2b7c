//! Schema normalization for raw station tables
//!
//! Turns a ragged [`RawTable`](crate::app::models::RawTable) into a
//! [`WeatherSeries`](crate::app::models::WeatherSeries) with one flat,
//! uniquely named schema:
//!
//! 1. merge a possible two-tier header into single column names
//! 2. repair ragged rows to the header width
//! 3. drop columns that are entirely null
//! 4. coerce column 0 to timestamps, the rest to numeric-or-null
//!
//! Coercion failures are per-cell and silent (the cell becomes null), but
//! every gap is counted in [`NormalizeStats`] so data quality stays
//! observable. Only a table in which the timestamp column cannot be
//! identified at all is a hard error.
//!
//! ## Components
//!
//! - [`header_merge`] - two-tier header reconciliation into column specs
//! - [`normalizer`] - row repair, column pruning, and cell coercion
//! - [`stats`] - per-column gap diagnostics

pub mod header_merge;
pub mod normalizer;
pub mod stats;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header_merge::{column_specs, merge_cell};
pub use normalizer::{NormalizedSeries, normalize, parse_numeric, parse_timestamp};
pub use stats::NormalizeStats;
