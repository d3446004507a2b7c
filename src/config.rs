//! Ingestion configuration and validation.
//!
//! Provides the configuration structure controlling format sniffing and row
//! extraction. Configuration is passed explicitly through the pipeline; the
//! core holds no process-wide state between calls.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{DEFAULT_HEADER_SCAN_ROWS, DEFAULT_SNIFF_WINDOW};
use crate::{Error, Result};

/// Configuration for one ingestion run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestConfig {
    /// Field delimiter for the delimited-text format
    pub delimiter: u8,

    /// Sample window for the strict delimited-text probe, in bytes
    pub sniff_window: usize,

    /// Number of leading rows scanned for the data boundary in binary
    /// spreadsheets that prepend a title row above their headers
    pub header_scan_rows: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            sniff_window: DEFAULT_SNIFF_WINDOW,
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
        }
    }
}

impl IngestConfig {
    /// Validate configuration values for consistency
    pub fn validate(&self) -> Result<()> {
        if self.delimiter == b'"' || self.delimiter == b'\n' || self.delimiter == b'\r' {
            return Err(Error::configuration(format!(
                "delimiter 0x{:02x} conflicts with record framing",
                self.delimiter
            )));
        }

        if self.sniff_window == 0 {
            return Err(Error::configuration(
                "sniff window must be greater than zero".to_string(),
            ));
        }

        if self.header_scan_rows == 0 {
            return Err(Error::configuration(
                "header scan depth must be greater than zero".to_string(),
            ));
        }

        debug!(
            "Validated ingest config: delimiter={:?}, sniff_window={}, header_scan_rows={}",
            self.delimiter as char, self.sniff_window, self.header_scan_rows
        );

        Ok(())
    }
}
