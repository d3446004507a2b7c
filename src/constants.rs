//! Application constants for the agromet processor
//!
//! This module contains format names, canonical column names, timestamp
//! formats, and agronomic defaults used throughout the application.

// =============================================================================
// Format Names
// =============================================================================

/// Format name used in error reporting for delimited text inputs
pub const FORMAT_DELIMITED: &str = "delimited-text";

/// Format name used in error reporting for SpreadsheetML markup inputs
pub const FORMAT_MARKUP: &str = "markup-spreadsheet";

/// Format name used in error reporting for binary spreadsheet inputs
pub const FORMAT_BINARY: &str = "binary-spreadsheet";

// =============================================================================
// Sniffing and Extraction
// =============================================================================

/// Number of raw bytes inspected for the XML declaration check
pub const SNIFF_PREFIX_LEN: usize = 20;

/// Default sample window for the strict delimited-text probe, in bytes
pub const DEFAULT_SNIFF_WINDOW: usize = 4096;

/// Default number of leading rows scanned for the data boundary when a
/// binary spreadsheet carries a title row above its headers
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 16;

/// UTF-8 byte-order mark some station exports prepend
pub const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Literal tag opening an XML declaration
pub const XML_DECLARATION_TAG: &[u8] = b"<?xml";

/// SpreadsheetML element names walked by the markup extractor
pub mod markup_elements {
    pub const TABLE: &str = "Table";
    pub const ROW: &str = "Row";
    pub const CELL: &str = "Cell";
    pub const DATA: &str = "Data";
}

/// Header rows carried by the markup and binary spreadsheet formats
/// (instrument label row above measurement-unit label row)
pub const SPREADSHEET_HEADER_ROWS: usize = 2;

// =============================================================================
// Timestamp Handling
// =============================================================================

/// Accepted timestamp layouts for the canonical first column, tried in order.
/// Station exports use ISO-like layouts only; locale formats are out of scope.
pub const TIMESTAMP_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%d",
];

// =============================================================================
// Column Name Contract
// =============================================================================

/// Canonical column names expected by downstream presentation code.
///
/// These strings are exact, case- and spacing-sensitive: they are produced by
/// merging the two-tier station headers and must match what summary cards and
/// charts probe for. A missed probe degrades to "no data", never an error.
pub mod columns {
    /// Canonical timestamp column; column 0 is always renamed to this
    pub const DATE_TIME: &str = "Date/Time";

    /// Daily maximum air temperature
    pub const TEMP_MAX: &str = "HC Air temperature [°C] (max)";

    /// Daily minimum air temperature
    pub const TEMP_MIN: &str = "HC Air temperature [°C] (min)";

    /// Average air temperature
    pub const TEMP_AVG: &str = "HC Air temperature [°C] (avg)";

    /// Precipitation total
    pub const PRECIPITATION: &str = "Precipitation [mm] (avg)";

    /// Minimum relative humidity
    pub const HUMIDITY_MIN: &str = "HC Relative humidity [%] (min)";

    /// Average relative humidity
    pub const HUMIDITY_AVG: &str = "HC Relative humidity [%] (avg)";
}

// =============================================================================
// Agronomic Defaults
// =============================================================================

/// Default cumulative GDD at which a crop is treated as nearing maturity,
/// in degree-days
pub const GDD_MATURITY_TARGET: f64 = 500.0;

/// Moving-average window used for trend smoothing, in observations
pub const MOVING_AVERAGE_WINDOW: usize = 3;

/// Rainfall classification thresholds in millimetres
pub mod rainfall {
    pub const HEAVY_MM: f64 = 30.0;
    pub const MODERATE_MM: f64 = 10.0;
}

/// Pest outbreak risk thresholds
pub mod pest_risk {
    /// Temperature at or above which risk is high when the air is dry
    pub const HIGH_TEMP_C: f64 = 28.0;

    /// Relative humidity at or below which hot weather counts as dry
    pub const HIGH_MAX_HUMIDITY_PCT: f64 = 60.0;

    /// Temperature at or above which risk is at least moderate
    pub const MODERATE_TEMP_C: f64 = 25.0;
}
