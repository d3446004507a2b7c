//! Field-task suggestions from forecast conditions and accumulated GDD

use super::alerts::{ForecastPoint, RainfallClass, analyze};
use crate::constants::{GDD_MATURITY_TARGET, pest_risk as risk};

/// Whether conditions suit fertilizer or pesticide application
pub fn suits_fertilization(dominant_rainfall: RainfallClass) -> bool {
    matches!(
        dominant_rainfall,
        RainfallClass::NoRain | RainfallClass::Light
    )
}

/// Whether accumulated GDD indicates harvest preparation
pub fn harvest_approaching(accumulated_gdd: Option<f64>) -> bool {
    accumulated_gdd.is_some_and(|gdd| gdd >= GDD_MATURITY_TARGET)
}

/// Suggest field tasks for a forecast window. An empty window yields no
/// suggestions rather than guessing.
pub fn suggest_tasks(points: &[ForecastPoint], accumulated_gdd: Option<f64>) -> Vec<String> {
    let Some(analysis) = analyze(points) else {
        return Vec::new();
    };

    let mut tasks = Vec::new();

    if suits_fertilization(analysis.dominant_rainfall) {
        tasks.push("Good window for fertilizing or pesticide application.".to_string());
    } else {
        tasks.push("High rain risk. Postpone fertilizer application.".to_string());
    }

    let mean_humidity =
        points.iter().map(|p| p.humidity).sum::<f64>() / points.len() as f64;
    if analysis.mean_temperature >= risk::HIGH_TEMP_C
        && mean_humidity <= risk::HIGH_MAX_HUMIDITY_PCT
    {
        tasks.push("Increase pest monitoring (high outbreak risk).".to_string());
    } else {
        tasks.push("Normal pest monitoring recommended.".to_string());
    }

    if harvest_approaching(accumulated_gdd) {
        tasks.push("Prepare harvesting plans; GDD approaching maturity.".to_string());
    }

    tasks
}
