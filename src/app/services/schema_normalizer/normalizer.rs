//! Row repair and cell coercion
//!
//! Consumes the raw table in one pass: repairs ragged rows to the header
//! width, drops all-null columns, then coerces the timestamp column and the
//! numeric remainder cell by cell. Coercion never fails a row; the cell
//! becomes null and the gap is counted.

use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;
use tracing::{debug, info, warn};

use super::header_merge;
use super::stats::NormalizeStats;
use crate::Result;
use crate::app::models::{ColumnSpec, Observation, RawTable, WeatherSeries};
use crate::constants::TIMESTAMP_FORMATS;

/// A normalized series together with its diagnostics
#[derive(Debug, Clone)]
pub struct NormalizedSeries {
    pub series: WeatherSeries,
    pub stats: NormalizeStats,
}

/// Normalize a raw table into a weather series.
///
/// Observations come out in source order, one per data row; the core never
/// sorts. Callers needing chronological order must sort explicitly.
pub fn normalize(table: &RawTable) -> Result<NormalizedSeries> {
    let specs = header_merge::column_specs(table.header_rows())?;
    let width = specs.len();

    let mut stats = NormalizeStats::new();
    stats.rows_in = table.data_rows().len();

    // Ragged-row repair: pad short rows with nulls, truncate long ones
    let repaired: Vec<Vec<Option<String>>> = table
        .data_rows()
        .iter()
        .map(|row| repair_row(row, width, &mut stats))
        .collect();

    let specs = prune_empty_columns(specs, &repaired, &mut stats);
    let column_names = unique_column_names(&specs);

    let mut observations = Vec::with_capacity(repaired.len());
    let mut previous_timestamp: Option<NaiveDateTime> = None;

    for row in &repaired {
        let timestamp = row[0].as_deref().and_then(parse_timestamp);
        if timestamp.is_none() {
            stats.timestamp_gaps += 1;
        }

        if let (Some(current), Some(previous)) = (timestamp, previous_timestamp) {
            if current < previous {
                stats.out_of_order_timestamps += 1;
                debug!("Out-of-order timestamp {} after {}", current, previous);
            }
        }
        if timestamp.is_some() {
            previous_timestamp = timestamp;
        }

        // Later duplicate column names overwrite earlier ones here, which
        // is what makes "last occurrence wins" observable downstream
        let mut values = HashMap::new();
        for spec in specs.iter().skip(1) {
            match row[spec.index].as_deref().and_then(parse_numeric) {
                Some(value) => {
                    values.insert(spec.name.clone(), value);
                }
                None => stats.record_null(&spec.name),
            }
        }

        observations.push(Observation { timestamp, values });
    }

    if stats.out_of_order_timestamps > 0 {
        warn!(
            "{} timestamp(s) out of chronological order; series kept in source order",
            stats.out_of_order_timestamps
        );
    }

    info!(
        "Normalized {} observations across {} columns ({} cell gaps)",
        observations.len(),
        column_names.len(),
        stats.cell_gap_total()
    );

    Ok(NormalizedSeries {
        series: WeatherSeries {
            columns: column_names,
            observations,
        },
        stats,
    })
}

/// Parse a cell of the canonical timestamp column. Exports use ISO-like
/// layouts; a bare date maps to midnight.
pub fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in TIMESTAMP_FORMATS {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(timestamp);
        }
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return date.and_hms_opt(0, 0, 0);
        }
    }

    None
}

/// Parse a cell as a plain decimal number
pub fn parse_numeric(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Repair one data row to exactly `width` cells
fn repair_row(
    row: &[Option<String>],
    width: usize,
    stats: &mut NormalizeStats,
) -> Vec<Option<String>> {
    let mut repaired = row.to_vec();

    if repaired.len() < width {
        stats.padded_rows += 1;
        repaired.resize(width, None);
    } else if repaired.len() > width {
        stats.truncated_rows += 1;
        repaired.truncate(width);
    }

    repaired
}

/// Drop columns whose data cells are all null. The timestamp column is
/// exempt: position 0 is the timestamp by contract even when every cell in
/// it failed to parse.
fn prune_empty_columns(
    specs: Vec<ColumnSpec>,
    rows: &[Vec<Option<String>>],
    stats: &mut NormalizeStats,
) -> Vec<ColumnSpec> {
    let (kept, dropped): (Vec<ColumnSpec>, Vec<ColumnSpec>) =
        specs.into_iter().partition(|spec| {
            spec.index == 0 || rows.iter().any(|row| row[spec.index].is_some())
        });

    for spec in dropped {
        debug!("Dropping all-null column '{}'", spec.name);
        stats.dropped_columns.push(spec.name);
    }

    kept
}

/// Positional column names with duplicates collapsed. Values for a
/// duplicated name come from its last occurrence, so the name list keeps a
/// single entry.
fn unique_column_names(specs: &[ColumnSpec]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(specs.len());
    for spec in specs {
        if names.contains(&spec.name) {
            warn!(
                "Duplicate column name '{}' after header merge; last occurrence wins",
                spec.name
            );
            continue;
        }
        names.push(spec.name.clone());
    }
    names
}
