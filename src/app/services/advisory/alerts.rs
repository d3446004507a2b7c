//! Rainfall and pest-risk classification with alert generation

use serde::Serialize;

use crate::constants::{GDD_MATURITY_TARGET, pest_risk as risk, rainfall};

/// One forecast interval: the minimal shape advisory logic needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastPoint {
    /// Expected rainfall in millimetres
    pub rain_mm: f64,

    /// Air temperature in degrees Celsius
    pub temperature: f64,

    /// Relative humidity in percent
    pub humidity: f64,
}

/// Rainfall intensity classes, ordered driest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum RainfallClass {
    NoRain,
    Light,
    Moderate,
    Heavy,
}

/// Pest outbreak risk classes, ordered safest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum PestRisk {
    Low,
    Moderate,
    High,
}

/// Alert severity for host rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AlertSeverity {
    Info,
    Warning,
    Critical,
}

/// One generated advisory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    pub severity: AlertSeverity,
    pub message: String,
}

/// Dominant conditions across a forecast window
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAnalysis {
    /// Most frequent rainfall class across the window
    pub dominant_rainfall: RainfallClass,

    /// Mean temperature across the window
    pub mean_temperature: f64,

    /// Most frequent pest risk across the window
    pub dominant_pest_risk: PestRisk,
}

/// Classify a rainfall amount
pub fn classify_rainfall(rain_mm: f64) -> RainfallClass {
    if rain_mm >= rainfall::HEAVY_MM {
        RainfallClass::Heavy
    } else if rain_mm >= rainfall::MODERATE_MM {
        RainfallClass::Moderate
    } else if rain_mm > 0.0 {
        RainfallClass::Light
    } else {
        RainfallClass::NoRain
    }
}

/// Classify pest outbreak risk from temperature and humidity
pub fn pest_risk(temperature: f64, humidity: f64) -> PestRisk {
    if temperature >= risk::HIGH_TEMP_C && humidity <= risk::HIGH_MAX_HUMIDITY_PCT {
        PestRisk::High
    } else if temperature >= risk::MODERATE_TEMP_C {
        PestRisk::Moderate
    } else {
        PestRisk::Low
    }
}

/// Analyze a forecast window into its dominant conditions.
/// Returns `None` for an empty window.
pub fn analyze(points: &[ForecastPoint]) -> Option<ForecastAnalysis> {
    if points.is_empty() {
        return None;
    }

    let rain_classes: Vec<RainfallClass> =
        points.iter().map(|p| classify_rainfall(p.rain_mm)).collect();
    let pest_risks: Vec<PestRisk> = points
        .iter()
        .map(|p| pest_risk(p.temperature, p.humidity))
        .collect();

    Some(ForecastAnalysis {
        dominant_rainfall: most_frequent(&rain_classes),
        mean_temperature: points.iter().map(|p| p.temperature).sum::<f64>()
            / points.len() as f64,
        dominant_pest_risk: most_frequent(&pest_risks),
    })
}

/// Generate advisory alerts for a forecast window and the current
/// accumulated GDD (when known)
pub fn generate_alerts(points: &[ForecastPoint], accumulated_gdd: Option<f64>) -> Vec<Alert> {
    let mut alerts = Vec::new();

    if let Some(analysis) = analyze(points) {
        match analysis.dominant_rainfall {
            RainfallClass::Heavy | RainfallClass::Moderate => alerts.push(Alert {
                severity: AlertSeverity::Warning,
                message: "Rain expected. Delay fertilizer or pesticide applications.".to_string(),
            }),
            _ => alerts.push(Alert {
                severity: AlertSeverity::Info,
                message: "Good weather for field activities.".to_string(),
            }),
        }

        match analysis.dominant_pest_risk {
            PestRisk::High => alerts.push(Alert {
                severity: AlertSeverity::Critical,
                message: "High pest risk. Increase inspection and set traps.".to_string(),
            }),
            PestRisk::Moderate => alerts.push(Alert {
                severity: AlertSeverity::Warning,
                message: "Moderate pest risk. Monitor closely.".to_string(),
            }),
            PestRisk::Low => {}
        }
    }

    if accumulated_gdd.is_some_and(|gdd| gdd >= GDD_MATURITY_TARGET) {
        alerts.push(Alert {
            severity: AlertSeverity::Info,
            message: "Crop nearing flowering/maturity by accumulated GDD. Prepare a harvesting plan."
                .to_string(),
        });
    }

    alerts
}

/// Most frequent value in a slice; the first-seen value wins ties
fn most_frequent<T: Copy + PartialEq>(values: &[T]) -> T {
    let mut best = values[0];
    let mut best_count = 0;

    for candidate in values {
        let count = values.iter().filter(|v| *v == candidate).count();
        if count > best_count {
            best = *candidate;
            best_count = count;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(rain_mm: f64, temperature: f64, humidity: f64) -> ForecastPoint {
        ForecastPoint {
            rain_mm,
            temperature,
            humidity,
        }
    }

    #[test]
    fn test_rainfall_classes() {
        assert_eq!(classify_rainfall(35.0), RainfallClass::Heavy);
        assert_eq!(classify_rainfall(30.0), RainfallClass::Heavy);
        assert_eq!(classify_rainfall(15.0), RainfallClass::Moderate);
        assert_eq!(classify_rainfall(2.0), RainfallClass::Light);
        assert_eq!(classify_rainfall(0.0), RainfallClass::NoRain);
    }

    #[test]
    fn test_pest_risk_classes() {
        assert_eq!(pest_risk(30.0, 50.0), PestRisk::High);
        // Hot but humid air is only moderate
        assert_eq!(pest_risk(30.0, 80.0), PestRisk::Moderate);
        assert_eq!(pest_risk(26.0, 50.0), PestRisk::Moderate);
        assert_eq!(pest_risk(22.0, 50.0), PestRisk::Low);
    }

    #[test]
    fn test_analyze_dominant_conditions() {
        let points = vec![
            point(0.0, 30.0, 50.0),
            point(12.0, 32.0, 55.0),
            point(0.0, 28.0, 58.0),
        ];

        let analysis = analyze(&points).unwrap();
        assert_eq!(analysis.dominant_rainfall, RainfallClass::NoRain);
        assert_eq!(analysis.dominant_pest_risk, PestRisk::High);
        assert_eq!(analysis.mean_temperature, 30.0);
    }

    #[test]
    fn test_analyze_empty_window() {
        assert_eq!(analyze(&[]), None);
    }

    #[test]
    fn test_rain_alert_on_wet_forecast() {
        let points = vec![point(40.0, 26.0, 80.0); 3];
        let alerts = generate_alerts(&points, None);

        assert!(alerts
            .iter()
            .any(|a| a.severity == AlertSeverity::Warning && a.message.contains("Rain")));
    }

    #[test]
    fn test_gdd_maturity_alert() {
        let points = vec![point(0.0, 22.0, 70.0)];

        let alerts = generate_alerts(&points, Some(520.0));
        assert!(alerts.iter().any(|a| a.message.contains("maturity")));

        let alerts = generate_alerts(&points, Some(100.0));
        assert!(!alerts.iter().any(|a| a.message.contains("maturity")));

        // Unknown GDD must not claim maturity
        let alerts = generate_alerts(&points, None);
        assert!(!alerts.iter().any(|a| a.message.contains("maturity")));
    }
}
