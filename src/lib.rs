//! Agromet Processor Library
//!
//! A Rust library for ingesting farm weather-station exports and deriving
//! growing-degree-day (GDD) accumulations for crop planning.
//!
//! Station vendors ship the same observations in three incompatible physical
//! formats: plain delimited text, a legacy two-row-header SpreadsheetML
//! markup file, and a binary spreadsheet. This library provides tools for:
//! - Classifying an upload by content rather than file extension
//! - Extracting raw rows from each physical format
//! - Reconciling one- and two-tier headers into a single normalized schema
//! - Repairing ragged rows and coercing cells with per-column diagnostics
//! - Computing daily and cumulative heat units with reset checkpoints
//! - Null-aware slice aggregates and moving averages for charting
//!
//! The pipeline is synchronous, stateless between calls, and performs no
//! network I/O; rendering and session state belong to the host application.

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod advisory;
        pub mod format_sniffer;
        pub mod gdd_accumulator;
        pub mod ingest;
        pub mod reference_tables;
        pub mod row_extractor;
        pub mod schema_normalizer;
        pub mod series_queries;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{CropProfile, GddPoint, InputFormat, Observation, WeatherSeries};
pub use config::IngestConfig;

/// Result type alias for the agromet processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ingestion and metric derivation
///
/// Cell-level coercion gaps are deliberately absent: a cell that fails to
/// parse becomes a null counted in
/// [`app::services::schema_normalizer::NormalizeStats`], never an error.
/// Only structural failures abort a file.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Structurally corrupt or unreadable input, fatal for that file
    #[error("{format} format error: {message}")]
    Format {
        /// Name of the format committed to by the sniffer
        format: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The timestamp column cannot be identified, fatal for that file
    #[error("schema error: {message}")]
    Schema { message: String },

    /// A derived metric was requested that the series cannot support.
    /// Fatal for that metric only; the series itself remains usable.
    #[error("cannot derive {metric}: {message}")]
    MetricPrecondition { metric: String, message: String },

    /// Configuration error
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Crop name not present in the reference table
    #[error("unknown crop '{name}' (see the reference command for known crops)")]
    UnknownCrop { name: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a format error tagged with the attempted format name
    pub fn format(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            format: format.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a format error carrying the underlying cause
    pub fn format_with_source(
        format: impl Into<String>,
        message: impl Into<String>,
        source: Box<dyn std::error::Error + Send + Sync>,
    ) -> Self {
        Self::Format {
            format: format.into(),
            message: message.into(),
            source: Some(source),
        }
    }

    /// Create a schema error
    pub fn schema(message: impl Into<String>) -> Self {
        Self::Schema {
            message: message.into(),
        }
    }

    /// Create a metric precondition error
    pub fn metric_precondition(metric: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MetricPrecondition {
            metric: metric.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an unknown crop error
    pub fn unknown_crop(name: impl Into<String>) -> Self {
        Self::UnknownCrop { name: name.into() }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<csv::Error> for Error {
    fn from(error: csv::Error) -> Self {
        Self::Format {
            format: constants::FORMAT_DELIMITED.to_string(),
            message: "delimited parsing failed".to_string(),
            source: Some(Box::new(error)),
        }
    }
}

impl From<quick_xml::Error> for Error {
    fn from(error: quick_xml::Error) -> Self {
        Self::Format {
            format: constants::FORMAT_MARKUP.to_string(),
            message: "markup parsing failed".to_string(),
            source: Some(Box::new(error)),
        }
    }
}

impl From<calamine::Error> for Error {
    fn from(error: calamine::Error) -> Self {
        Self::Format {
            format: constants::FORMAT_BINARY.to_string(),
            message: "spreadsheet codec failed".to_string(),
            source: Some(Box::new(error)),
        }
    }
}
