//! Command-line argument definitions for the agromet processor
//!
//! Defines the CLI interface using the clap derive API: one `analyze`
//! command running the full ingestion pipeline over a single station
//! export, and a `reference` command printing the static agronomic tables.

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::{Error, Result};

/// CLI arguments for the agromet weather-station processor
///
/// Normalizes farm weather-station exports (delimited text, SpreadsheetML
/// markup, or binary spreadsheets) into one time-series schema and derives
/// growing-degree-day accumulations for crop planning.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "agromet-processor",
    version,
    about = "Normalize farm weather-station exports and derive GDD accumulations",
    long_about = "Ingests one weather-station export in any of the three vendor formats \
                  (delimited text, legacy SpreadsheetML markup, binary spreadsheet), \
                  reconciles it into a normalized observation series, and derives daily \
                  and cumulative growing-degree-days against a crop base temperature \
                  with an optional season reset checkpoint."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands for the agromet processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Analyze one weather-station export (main command)
    Analyze(AnalyzeArgs),
    /// Print the crop and pest reference tables
    Reference(ReferenceArgs),
}

/// Arguments for the analyze command
#[derive(Debug, Clone, Parser)]
pub struct AnalyzeArgs {
    /// Path to the station export file
    ///
    /// The physical format is sniffed from the content; the file extension
    /// is ignored.
    #[arg(value_name = "FILE", help = "Path to the station export file")]
    pub input_path: PathBuf,

    /// Crop to accumulate heat units for
    ///
    /// Looked up case-insensitively in the crop reference table. Either
    /// this or --base-temp must be given.
    #[arg(
        short = 'c',
        long = "crop",
        value_name = "NAME",
        help = "Crop name from the reference table"
    )]
    pub crop: Option<String>,

    /// Base temperature override in degrees Celsius
    ///
    /// Bypasses the crop reference table. Takes precedence over --crop for
    /// the accumulation threshold; the crop name is still used for display.
    #[arg(
        long = "base-temp",
        value_name = "DEGREES_C",
        help = "Base temperature override in °C",
        allow_negative_numbers = true
    )]
    pub base_temperature: Option<f64>,

    /// Season reset checkpoint
    ///
    /// Cumulative GDD restarts at zero on the first observation carrying
    /// this calendar date. Without it the accumulation runs from the start
    /// of the series.
    #[arg(
        short = 'r',
        long = "reset-date",
        value_name = "YYYY-MM-DD",
        help = "Calendar date at which cumulative GDD resets"
    )]
    pub reset_date: Option<NaiveDate>,

    /// Calendar date for the daily summary card
    ///
    /// Defaults to today's local date.
    #[arg(
        long = "date",
        value_name = "YYYY-MM-DD",
        help = "Date for the daily summary (defaults to today)"
    )]
    pub summary_date: Option<NaiveDate>,

    /// Trend window in days for the smoothed moving averages
    #[arg(
        short = 'w',
        long = "window-days",
        value_name = "DAYS",
        default_value_t = 7,
        help = "Trend window in days"
    )]
    pub window_days: i64,

    /// Field delimiter for delimited-text exports
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        default_value = ",",
        help = "Field delimiter for delimited-text exports"
    )]
    pub delimiter: char,

    /// Output format for results
    #[arg(
        long = "output-format",
        value_enum,
        default_value = "human",
        help = "Output format for results"
    )]
    pub output_format: OutputFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the reference command
#[derive(Debug, Clone, Parser)]
pub struct ReferenceArgs {
    /// Output format for the tables
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the reference tables"
    )]
    pub output_format: OutputFormat,
}

/// Output format options for machine-readable results
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl AnalyzeArgs {
    /// Validate the analyze command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        if !self.input_path.exists() {
            return Err(Error::configuration(format!(
                "input file does not exist: {}",
                self.input_path.display()
            )));
        }

        if self.input_path.is_dir() {
            return Err(Error::configuration(format!(
                "input path is a directory: {}",
                self.input_path.display()
            )));
        }

        if self.crop.is_none() && self.base_temperature.is_none() {
            return Err(Error::configuration(
                "either --crop or --base-temp is required".to_string(),
            ));
        }

        if self.window_days <= 0 {
            return Err(Error::configuration(
                "trend window must be at least one day".to_string(),
            ));
        }

        if !self.delimiter.is_ascii() {
            return Err(Error::configuration(
                "delimiter must be a single ASCII character".to_string(),
            ));
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }
}
