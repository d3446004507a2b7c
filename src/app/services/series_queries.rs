//! Stateless read-only aggregates over a weather series
//!
//! Everything here is a pure function over a series slice: date-predicate
//! filters, null-aware sum/mean/min over a named column, trailing moving
//! averages for trend charts, and the daily summary the dashboard cards
//! consume. Aggregates ignore nulls, and an aggregate over an all-null
//! slice yields "no data" (`None`) rather than zero, and callers must keep the
//! two distinguishable.
//!
//! The core never reads the clock: "today" and "last N days" are relative
//! to a caller-supplied reference instant.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::app::models::{Observation, WeatherSeries};
use crate::app::services::gdd_accumulator;
use crate::constants::columns;

/// Observations recorded on one calendar date, in series order
pub fn on_date<'a>(series: &'a WeatherSeries, date: NaiveDate) -> Vec<&'a Observation> {
    series
        .observations
        .iter()
        .filter(|obs| obs.date() == Some(date))
        .collect()
}

/// Observations within the last `days` days before the reference instant.
/// Observations with unparsable timestamps are excluded.
pub fn within_last_days<'a>(
    series: &'a WeatherSeries,
    reference: NaiveDateTime,
    days: i64,
) -> Vec<&'a Observation> {
    let cutoff = reference - Duration::days(days);
    series
        .observations
        .iter()
        .filter(|obs| {
            obs.timestamp
                .is_some_and(|ts| ts > cutoff && ts <= reference)
        })
        .collect()
}

/// Sum of a named column over a slice, `None` when every cell is null
pub fn column_sum(observations: &[&Observation], column: &str) -> Option<f64> {
    let values = non_null_values(observations, column);
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum())
    }
}

/// Mean of a named column over a slice, `None` when every cell is null
pub fn column_mean(observations: &[&Observation], column: &str) -> Option<f64> {
    let values = non_null_values(observations, column);
    if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    }
}

/// Minimum of a named column over a slice, `None` when every cell is null
pub fn column_min(observations: &[&Observation], column: &str) -> Option<f64> {
    non_null_values(observations, column)
        .into_iter()
        .fold(None, |acc, value| match acc {
            Some(current) if current <= value => Some(current),
            _ => Some(value),
        })
}

/// Trailing moving average of a named column for charting, one slot per
/// observation. A slot is `None` until the window is full and when the
/// window holds no non-null values; otherwise it is the mean of the
/// window's non-null values.
pub fn moving_average(series: &WeatherSeries, column: &str, window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; series.len()];
    }

    series
        .observations
        .iter()
        .enumerate()
        .map(|(end, _)| {
            if end + 1 < window {
                return None;
            }
            let start = end + 1 - window;
            let values: Vec<f64> = series.observations[start..=end]
                .iter()
                .filter_map(|obs| obs.value(column))
                .collect();
            if values.is_empty() {
                None
            } else {
                Some(values.iter().sum::<f64>() / values.len() as f64)
            }
        })
        .collect()
}

/// One calendar date's summary card figures. Every field degrades to
/// "no data" independently when its column is missing or all-null.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    /// Calendar date the slice covers
    pub date: NaiveDate,

    /// Observations recorded on the date
    pub observation_count: usize,

    /// Rainfall total in millimetres
    pub rainfall_total: Option<f64>,

    /// Mean air temperature in degrees Celsius
    pub mean_temperature: Option<f64>,

    /// Minimum relative humidity in percent
    pub min_humidity: Option<f64>,

    /// Heat units for the date against the supplied base temperature
    pub heat_units: Option<f64>,
}

/// Aggregate the canonical summary metrics for one calendar date
pub fn daily_summary(series: &WeatherSeries, date: NaiveDate, base_temperature: f64) -> DailySummary {
    let slice = on_date(series, date);

    DailySummary {
        date,
        observation_count: slice.len(),
        rainfall_total: column_sum(&slice, columns::PRECIPITATION),
        mean_temperature: column_mean(&slice, columns::TEMP_AVG),
        min_humidity: column_min(&slice, columns::HUMIDITY_MIN),
        heat_units: gdd_accumulator::slice_heat_units(&slice, base_temperature),
    }
}

fn non_null_values(observations: &[&Observation], column: &str) -> Vec<f64> {
    observations
        .iter()
        .filter_map(|obs| obs.value(column))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn obs(day: u32, hour: u32, fields: &[(&str, f64)]) -> Observation {
        let mut values = HashMap::new();
        for (column, value) in fields {
            values.insert(column.to_string(), *value);
        }
        Observation {
            timestamp: NaiveDate::from_ymd_opt(2024, 3, day)
                .unwrap()
                .and_hms_opt(hour, 0, 0),
            values,
        }
    }

    fn series(observations: Vec<Observation>) -> WeatherSeries {
        WeatherSeries {
            columns: vec![
                columns::DATE_TIME.to_string(),
                columns::PRECIPITATION.to_string(),
                columns::TEMP_AVG.to_string(),
                columns::HUMIDITY_MIN.to_string(),
            ],
            observations,
        }
    }

    #[test]
    fn test_on_date_slices_by_calendar_date() {
        let s = series(vec![
            obs(1, 6, &[(columns::PRECIPITATION, 2.0)]),
            obs(1, 18, &[(columns::PRECIPITATION, 3.0)]),
            obs(2, 6, &[(columns::PRECIPITATION, 9.0)]),
        ]);

        let slice = on_date(&s, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(slice.len(), 2);
        assert_eq!(column_sum(&slice, columns::PRECIPITATION), Some(5.0));
    }

    #[test]
    fn test_within_last_days_excludes_null_timestamps() {
        let mut no_ts = obs(1, 6, &[(columns::PRECIPITATION, 99.0)]);
        no_ts.timestamp = None;

        let s = series(vec![
            obs(1, 6, &[(columns::PRECIPITATION, 2.0)]),
            obs(8, 6, &[(columns::PRECIPITATION, 3.0)]),
            no_ts,
        ]);

        let reference = NaiveDate::from_ymd_opt(2024, 3, 8)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let slice = within_last_days(&s, reference, 7);

        assert_eq!(slice.len(), 1);
        assert_eq!(slice[0].value(columns::PRECIPITATION), Some(3.0));
    }

    #[test]
    fn test_all_null_slice_is_no_data_not_zero() {
        let s = series(vec![obs(1, 6, &[]), obs(1, 18, &[])]);
        let slice = on_date(&s, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(column_sum(&slice, columns::PRECIPITATION), None);
        assert_eq!(column_mean(&slice, columns::TEMP_AVG), None);
        assert_eq!(column_min(&slice, columns::HUMIDITY_MIN), None);
    }

    #[test]
    fn test_aggregates_ignore_nulls() {
        let s = series(vec![
            obs(1, 6, &[(columns::TEMP_AVG, 20.0)]),
            obs(1, 12, &[]),
            obs(1, 18, &[(columns::TEMP_AVG, 30.0)]),
        ]);
        let slice = on_date(&s, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(column_mean(&slice, columns::TEMP_AVG), Some(25.0));
    }

    #[test]
    fn test_column_min() {
        let s = series(vec![
            obs(1, 6, &[(columns::HUMIDITY_MIN, 61.0)]),
            obs(1, 18, &[(columns::HUMIDITY_MIN, 55.0)]),
        ]);
        let slice = on_date(&s, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());

        assert_eq!(column_min(&slice, columns::HUMIDITY_MIN), Some(55.0));
    }

    #[test]
    fn test_moving_average_window_three() {
        let s = series(vec![
            obs(1, 6, &[(columns::PRECIPITATION, 3.0)]),
            obs(2, 6, &[(columns::PRECIPITATION, 6.0)]),
            obs(3, 6, &[(columns::PRECIPITATION, 9.0)]),
            obs(4, 6, &[(columns::PRECIPITATION, 12.0)]),
        ]);

        let smoothed = moving_average(&s, columns::PRECIPITATION, 3);
        assert_eq!(smoothed, vec![None, None, Some(6.0), Some(9.0)]);
    }

    #[test]
    fn test_moving_average_skips_nulls_in_window() {
        let s = series(vec![
            obs(1, 6, &[(columns::PRECIPITATION, 3.0)]),
            obs(2, 6, &[]),
            obs(3, 6, &[(columns::PRECIPITATION, 9.0)]),
        ]);

        let smoothed = moving_average(&s, columns::PRECIPITATION, 3);
        assert_eq!(smoothed[2], Some(6.0));
    }

    #[test]
    fn test_daily_summary_degrades_per_field() {
        let s = series(vec![
            obs(1, 6, &[(columns::PRECIPITATION, 2.5), (columns::TEMP_AVG, 27.0)]),
            obs(1, 18, &[(columns::PRECIPITATION, 1.5), (columns::TEMP_AVG, 29.0)]),
        ]);

        let summary = daily_summary(&s, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 15.0);

        assert_eq!(summary.observation_count, 2);
        assert_eq!(summary.rainfall_total, Some(4.0));
        assert_eq!(summary.mean_temperature, Some(28.0));
        // Humidity column all-null for the day
        assert_eq!(summary.min_humidity, None);
        // Falls back to the mean of averages: 28 - 15
        assert_eq!(summary.heat_units, Some(13.0));
    }

    #[test]
    fn test_daily_summary_empty_date() {
        let s = series(Vec::new());
        let summary = daily_summary(&s, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(), 15.0);

        assert_eq!(summary.observation_count, 0);
        assert_eq!(summary.rainfall_total, None);
        assert_eq!(summary.heat_units, None);
    }
}
