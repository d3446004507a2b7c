//! Ingestion orchestration: sniff → extract → normalize
//!
//! One synchronous, blocking call chain per uploaded file. The input is
//! read fully into memory before any stage runs, since station exports are
//! bounded (daily or sub-daily granularity over a few years), and every
//! stage is a pure function, so repeated calls are independent and
//! reentrant. There is no retry: a structural failure in the committed
//! format is terminal for that input and propagates verbatim.

use std::io::{Read, Seek};
use tracing::info;

use crate::app::models::{InputFormat, WeatherSeries};
use crate::app::services::format_sniffer;
use crate::app::services::row_extractor;
use crate::app::services::schema_normalizer::{self, NormalizeStats};
use crate::config::IngestConfig;
use crate::{Error, Result};

/// Outcome of one ingestion run
#[derive(Debug, Clone)]
pub struct IngestResult {
    /// The normalized observation series
    pub series: WeatherSeries,

    /// Physical format the sniffer committed to
    pub format: InputFormat,

    /// Normalization diagnostics (row repairs, per-column gaps)
    pub stats: NormalizeStats,
}

/// Ingest one uploaded file from a seekable byte resource.
///
/// The read cursor may be anywhere on entry; sniffing restores it before
/// the full read begins.
pub fn ingest<R: Read + Seek>(input: &mut R, config: &IngestConfig) -> Result<IngestResult> {
    config.validate()?;

    let format = format_sniffer::sniff(input, config)?;

    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|e| Error::io("failed to read input", e))?;

    ingest_classified(format, &bytes, config)
}

/// Ingest raw bytes that have already been read into memory
pub fn ingest_bytes(bytes: &[u8], config: &IngestConfig) -> Result<IngestResult> {
    config.validate()?;

    // Whole input is in hand, so the probe window is never truncated
    let sample = &bytes[..bytes.len().min(config.sniff_window)];
    let truncated = bytes.len() > sample.len();
    let format = format_sniffer::classify(sample, config.delimiter, truncated);

    ingest_classified(format, bytes, config)
}

fn ingest_classified(
    format: InputFormat,
    bytes: &[u8],
    config: &IngestConfig,
) -> Result<IngestResult> {
    info!("Ingesting {} bytes as {}", bytes.len(), format.name());

    let table = row_extractor::extract(format, bytes, config)?;
    let normalized = schema_normalizer::normalize(&table)?;

    Ok(IngestResult {
        series: normalized.series,
        format,
        stats: normalized.stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    use crate::constants::columns;

    const DELIMITED: &str = "Date/Time,Precip,TempMax,TempMin\n\
                             2024-01-01 09:00:00,5,30,20\n\
                             2024-01-02 09:00:00,0,32,18\n";

    fn markup_export() -> String {
        r#"<?xml version="1.0"?>
<Workbook xmlns:ss="urn:schemas-microsoft-com:office:spreadsheet">
 <ss:Worksheet ss:Name="Export">
  <ss:Table>
   <ss:Row>
    <ss:Cell><ss:Data>Date/Time</ss:Data></ss:Cell>
    <ss:Cell><ss:Data>Temp</ss:Data></ss:Cell>
    <ss:Cell><ss:Data>Humidity</ss:Data></ss:Cell>
   </ss:Row>
   <ss:Row>
    <ss:Cell/>
    <ss:Cell><ss:Data>avg</ss:Data></ss:Cell>
    <ss:Cell><ss:Data>min</ss:Data></ss:Cell>
   </ss:Row>
   <ss:Row>
    <ss:Cell><ss:Data>2024-01-01 09:00:00</ss:Data></ss:Cell>
    <ss:Cell><ss:Data>27.5</ss:Data></ss:Cell>
    <ss:Cell><ss:Data>61</ss:Data></ss:Cell>
   </ss:Row>
  </ss:Table>
 </ss:Worksheet>
</Workbook>"#
            .to_string()
    }

    #[test]
    fn test_delimited_end_to_end() {
        let mut input = Cursor::new(DELIMITED.as_bytes().to_vec());
        let result = ingest(&mut input, &IngestConfig::default()).unwrap();

        assert_eq!(result.format, InputFormat::DelimitedText);
        assert_eq!(result.series.len(), 2);
        assert_eq!(
            result.series.columns,
            vec![columns::DATE_TIME, "Precip", "TempMax", "TempMin"]
        );
        assert!(result.stats.is_clean());
    }

    #[test]
    fn test_markup_end_to_end_merges_headers() {
        let export = markup_export();
        let result = ingest_bytes(export.as_bytes(), &IngestConfig::default()).unwrap();

        assert_eq!(result.format, InputFormat::MarkupSpreadsheet);
        assert_eq!(
            result.series.columns,
            vec![columns::DATE_TIME, "Temp (avg)", "Humidity (min)"]
        );
        assert_eq!(
            result.series.observations[0].value("Temp (avg)"),
            Some(27.5)
        );
    }

    #[test]
    fn test_ingest_reads_from_current_cursor() {
        let mut input = Cursor::new(DELIMITED.as_bytes().to_vec());
        let first = ingest(&mut input, &IngestConfig::default()).unwrap();

        // A second run over the same (rewound) resource is independent
        input.set_position(0);
        let second = ingest(&mut input, &IngestConfig::default()).unwrap();

        assert_eq!(first.series.len(), second.series.len());
    }

    #[test]
    fn test_unreadable_binary_is_a_format_error() {
        // Classified binary by fallback, then rejected by the codec
        let bytes = vec![0x00, 0x01, 0x02, 0x03, 0x04, 0x05];
        let result = ingest_bytes(&bytes, &IngestConfig::default());

        match result {
            Err(Error::Format { format, .. }) => {
                assert_eq!(format, InputFormat::BinarySpreadsheet.name());
            }
            other => panic!("expected a format error, got {:?}", other.map(|r| r.format)),
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_io() {
        let config = IngestConfig {
            sniff_window: 0,
            ..Default::default()
        };

        let result = ingest_bytes(DELIMITED.as_bytes(), &config);
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }
}
