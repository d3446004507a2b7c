//! Data models for weather-station ingestion and GDD derivation
//!
//! This module contains the core data structures flowing through the
//! pipeline: the raw extraction table, the normalized observation series,
//! crop and pest reference profiles, and derived GDD points.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::constants::{self, columns};

// =============================================================================
// Input Classification
// =============================================================================

/// Physical format of an uploaded station export, as classified by the
/// format sniffer. Each extractor commits to exactly one variant; there is
/// no cross-format retry once classification has happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputFormat {
    /// Plain delimited text with a single header row
    DelimitedText,
    /// Legacy SpreadsheetML markup with two header rows
    MarkupSpreadsheet,
    /// Binary spreadsheet workbook
    BinarySpreadsheet,
}

impl InputFormat {
    /// Stable name used in error messages and reports
    pub fn name(&self) -> &'static str {
        match self {
            InputFormat::DelimitedText => constants::FORMAT_DELIMITED,
            InputFormat::MarkupSpreadsheet => constants::FORMAT_MARKUP,
            InputFormat::BinarySpreadsheet => constants::FORMAT_BINARY,
        }
    }
}

impl std::fmt::Display for InputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Raw Extraction Table
// =============================================================================

/// Number of leading rows in a [`RawTable`] that are header candidates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderDepth {
    /// One header row (delimited text)
    Single,
    /// Instrument-label row above measurement-unit row (spreadsheet formats)
    Double,
}

impl HeaderDepth {
    /// Header row count as a row offset into the table
    pub fn rows(&self) -> usize {
        match self {
            HeaderDepth::Single => 1,
            HeaderDepth::Double => 2,
        }
    }
}

/// Raw table produced by a row extractor: an ordered sequence of ordered
/// cell sequences. The first `header_depth.rows()` rows are header
/// candidates; the remainder are data rows. Rows may be ragged; no width
/// invariant holds until normalization repairs them.
#[derive(Debug, Clone)]
pub struct RawTable {
    /// All rows in source order, header candidates first
    pub rows: Vec<Vec<Option<String>>>,

    /// How many leading rows carry header labels
    pub header_depth: HeaderDepth,
}

impl RawTable {
    /// Header candidate rows, in order
    pub fn header_rows(&self) -> &[Vec<Option<String>>] {
        let depth = self.header_depth.rows().min(self.rows.len());
        &self.rows[..depth]
    }

    /// Data rows following the header candidates
    pub fn data_rows(&self) -> &[Vec<Option<String>>] {
        let depth = self.header_depth.rows().min(self.rows.len());
        &self.rows[depth..]
    }
}

/// A normalized column: display name paired with its source position index.
/// Built by the header merge; position 0 always carries the canonical
/// timestamp name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Merged display name
    pub name: String,

    /// Position in the repaired source row
    pub index: usize,
}

// =============================================================================
// Normalized Series
// =============================================================================

/// One normalized record: a timestamp (null if the source cell was
/// unparsable) plus named numeric values. A column absent from `values` is a
/// null cell. Observations are created exclusively by the schema normalizer
/// and consumed read-only downstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    /// Parsed timestamp, or `None` when the source cell could not be parsed
    pub timestamp: Option<NaiveDateTime>,

    /// Numeric values keyed by normalized column name; missing key = null
    pub values: HashMap<String, f64>,
}

impl Observation {
    /// Value of a named column, `None` for null cells and unknown columns
    pub fn value(&self, column: &str) -> Option<f64> {
        self.values.get(column).copied()
    }

    /// Calendar date of this observation, when the timestamp parsed
    pub fn date(&self) -> Option<NaiveDate> {
        self.timestamp.map(|ts| ts.date())
    }
}

/// An ordered sequence of observations in source-file order.
///
/// The core never sorts: callers needing chronological order must sort
/// explicitly. A series is constructed once per uploaded file and holds no
/// reference to the bytes it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherSeries {
    /// Normalized column names in positional order; position 0 is the
    /// canonical timestamp column
    pub columns: Vec<String>,

    /// Observations in the order they appeared in the source file
    pub observations: Vec<Observation>,
}

impl WeatherSeries {
    /// Number of observations
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Whether the series holds no observations
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Whether a named column survived normalization
    pub fn has_column(&self, column: &str) -> bool {
        self.columns.iter().any(|name| name == column)
    }

    /// Whether the series carries any usable temperature field for GDD
    pub fn has_temperature_data(&self) -> bool {
        (self.has_column(columns::TEMP_MAX) && self.has_column(columns::TEMP_MIN))
            || self.has_column(columns::TEMP_AVG)
    }
}

// =============================================================================
// Reference Profiles
// =============================================================================

/// A crop and the base temperature below which it accumulates no heat units.
/// Immutable, looked up from the static reference table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropProfile {
    /// Crop name (e.g. "Durian", "Maize")
    pub name: String,

    /// Base temperature in degrees Celsius
    pub base_temperature: f64,
}

impl CropProfile {
    pub fn new(name: impl Into<String>, base_temperature: f64) -> Self {
        Self {
            name: name.into(),
            base_temperature,
        }
    }
}

/// A pest and the temperature band in which outbreaks accelerate.
/// Pure reference data consumed by advisory text generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PestProfile {
    /// Pest name
    pub name: String,

    /// Lower bound of the optimal temperature range in degrees Celsius
    pub optimal_min: f64,

    /// Upper bound of the optimal temperature range in degrees Celsius
    pub optimal_max: f64,

    /// Advisory note shown alongside the range
    pub note: &'static str,
}

// =============================================================================
// Derived Metrics
// =============================================================================

/// One derived GDD record, produced one-to-one from observations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GddPoint {
    /// Timestamp of the source observation
    pub timestamp: Option<NaiveDateTime>,

    /// Daily heat units, clamped non-negative; `None` marks a data gap
    /// (the observation lacked every usable temperature field)
    pub daily: Option<f64>,

    /// Running heat units since the last reset; carries across gaps
    pub cumulative: f64,
}
