//! Tests for delimited-text extraction

use super::{sample_delimited_export, test_config};
use crate::app::models::HeaderDepth;
use crate::app::services::row_extractor::delimited;

#[test]
fn test_extracts_header_and_data_rows() {
    let input = sample_delimited_export();
    let table = delimited::extract(input.as_bytes(), &test_config()).unwrap();

    assert_eq!(table.header_depth, HeaderDepth::Single);
    assert_eq!(table.header_rows().len(), 1);
    assert_eq!(table.data_rows().len(), 2);
    assert_eq!(table.header_rows()[0][0].as_deref(), Some("Date/Time"));
    assert_eq!(
        table.data_rows()[0][0].as_deref(),
        Some("2024-01-01 09:00:00")
    );
}

#[test]
fn test_ragged_rows_survive_verbatim() {
    let input = sample_delimited_export();
    let table = delimited::extract(input.as_bytes(), &test_config()).unwrap();

    // The writer dropped the trailing cell; repair is the normalizer's job
    assert_eq!(table.header_rows()[0].len(), 4);
    assert_eq!(table.data_rows()[1].len(), 3);
}

#[test]
fn test_empty_cells_become_null() {
    let input = "Date/Time,Precip\n2024-01-01, \n";
    let table = delimited::extract(input.as_bytes(), &test_config()).unwrap();

    assert_eq!(table.data_rows()[0][1], None);
}

#[test]
fn test_bom_is_stripped() {
    let mut input = vec![0xEF, 0xBB, 0xBF];
    input.extend_from_slice(b"Date/Time,Precip\n2024-01-01,5\n");
    let table = delimited::extract(&input, &test_config()).unwrap();

    assert_eq!(table.header_rows()[0][0].as_deref(), Some("Date/Time"));
}

#[test]
fn test_semicolon_delimiter() {
    let mut config = test_config();
    config.delimiter = b';';

    let input = "Date/Time;Precip\n2024-01-01;5\n";
    let table = delimited::extract(input.as_bytes(), &config).unwrap();

    assert_eq!(table.header_rows()[0].len(), 2);
    assert_eq!(table.data_rows()[0][1].as_deref(), Some("5"));
}

#[test]
fn test_empty_input_is_a_format_error() {
    let result = delimited::extract(b"", &test_config());
    assert!(result.is_err());

    let message = result.unwrap_err().to_string();
    assert!(message.contains("delimited-text"));
}
