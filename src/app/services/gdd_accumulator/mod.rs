//! Growing-degree-day accumulation
//!
//! Derives per-observation heat units against a crop base temperature and a
//! running, resettable cumulative sum. Field precedence per observation:
//!
//! 1. paired max/min temperatures ⇒ `(max + min) / 2 − base`
//! 2. average temperature ⇒ `avg − base`
//! 3. neither ⇒ a data gap, reported as such rather than a silent zero
//!
//! Daily values clamp at zero (accumulation below the base temperature is
//! defined as no contribution, never negative) and the cumulative sum runs
//! over the series in the order it is presented. A configured reset date
//! zeroes the running total once, on its first occurrence in series order,
//! before that observation's own contribution is added. A reset date absent
//! from the series simply never fires.

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::app::models::{CropProfile, GddPoint, Observation, WeatherSeries};
use crate::constants::columns;
use crate::{Error, Result};

#[cfg(test)]
pub mod tests;

/// Derive GDD points for every observation in the series.
///
/// Fails with a metric precondition error when the series carries none of
/// the usable temperature columns at all; the series itself stays valid for
/// other queries.
pub fn accumulate(
    series: &WeatherSeries,
    crop: &CropProfile,
    reset_date: Option<NaiveDate>,
) -> Result<Vec<GddPoint>> {
    if !series.has_temperature_data() {
        return Err(Error::metric_precondition(
            "growing-degree-days",
            format!(
                "series has neither paired '{}'/'{}' nor '{}'",
                columns::TEMP_MAX,
                columns::TEMP_MIN,
                columns::TEMP_AVG
            ),
        ));
    }

    let mut points = Vec::with_capacity(series.len());
    let mut running = 0.0_f64;
    let mut reset_fired = false;
    let mut gap_count = 0_usize;

    for observation in &series.observations {
        if let (Some(target), Some(date)) = (reset_date, observation.date()) {
            if !reset_fired && date == target {
                debug!("Resetting cumulative heat units at {}", date);
                running = 0.0;
                reset_fired = true;
            }
        }

        let daily = daily_heat_units(observation, crop.base_temperature);
        match daily {
            Some(value) => running += value,
            None => {
                gap_count += 1;
                debug!("Temperature gap at {:?}; cumulative unchanged", observation.timestamp);
            }
        }

        points.push(GddPoint {
            timestamp: observation.timestamp,
            daily,
            cumulative: running,
        });
    }

    info!(
        "Accumulated {:.1} heat units for {} over {} observations ({} gaps)",
        running,
        crop.name,
        points.len(),
        gap_count
    );

    Ok(points)
}

/// Heat units contributed by one observation, clamped non-negative.
/// `None` marks a data gap: no usable temperature field was present.
pub fn daily_heat_units(observation: &Observation, base_temperature: f64) -> Option<f64> {
    let average = match (
        observation.value(columns::TEMP_MAX),
        observation.value(columns::TEMP_MIN),
    ) {
        (Some(max), Some(min)) => (max + min) / 2.0,
        _ => observation.value(columns::TEMP_AVG)?,
    };

    Some((average - base_temperature).max(0.0))
}

/// Heat units for a same-day slice of observations, the figure the daily
/// summary card shows: the slice's highest maximum paired with its lowest
/// minimum, falling back to the mean of averages.
pub fn slice_heat_units(observations: &[&Observation], base_temperature: f64) -> Option<f64> {
    let maxes: Vec<f64> = observations
        .iter()
        .filter_map(|obs| obs.value(columns::TEMP_MAX))
        .collect();
    let mins: Vec<f64> = observations
        .iter()
        .filter_map(|obs| obs.value(columns::TEMP_MIN))
        .collect();

    let average = if !maxes.is_empty() && !mins.is_empty() {
        let highest = maxes.iter().cloned().fold(f64::MIN, f64::max);
        let lowest = mins.iter().cloned().fold(f64::MAX, f64::min);
        (highest + lowest) / 2.0
    } else {
        let averages: Vec<f64> = observations
            .iter()
            .filter_map(|obs| obs.value(columns::TEMP_AVG))
            .collect();
        if averages.is_empty() {
            return None;
        }
        averages.iter().sum::<f64>() / averages.len() as f64
    };

    Some((average - base_temperature).max(0.0))
}
