//! Test fixtures for GDD accumulation


use chrono::NaiveDate;
use std::collections::HashMap;

use crate::app::models::{CropProfile, Observation, WeatherSeries};
use crate::constants::columns;

/// Observation on a given day with the named numeric fields set
pub fn observation(day: u32, fields: &[(&str, f64)]) -> Observation {
    let mut values = HashMap::new();
    for (column, value) in fields {
        values.insert(column.to_string(), *value);
    }

    Observation {
        timestamp: NaiveDate::from_ymd_opt(2024, 1, day)
            .unwrap()
            .and_hms_opt(9, 0, 0),
        values,
    }
}

/// Series over the given observations with the max/min temperature schema
pub fn max_min_series(observations: Vec<Observation>) -> WeatherSeries {
    WeatherSeries {
        columns: vec![
            columns::DATE_TIME.to_string(),
            columns::TEMP_MAX.to_string(),
            columns::TEMP_MIN.to_string(),
        ],
        observations,
    }
}

/// Test crop with a base temperature of 15 °C
pub fn durian() -> CropProfile {
    CropProfile::new("Durian", 15.0)
}
