//! Advisory generation over forecast-shaped inputs
//!
//! Pure classification and text-suggestion functions the host renders as
//! alert banners and task lists. Inputs are simple per-interval points
//! (rain, temperature, humidity): either rows of an ingested series or an
//! external forecast feed of the same shape. No I/O, no rendering, no
//! session state.
//!
//! ## Components
//!
//! - [`alerts`] - rainfall and pest-risk classification, alert generation
//! - [`tasks`] - field-task suggestions keyed to conditions and GDD

pub mod alerts;
pub mod tasks;

pub use alerts::{
    Alert, AlertSeverity, ForecastAnalysis, ForecastPoint, PestRisk, RainfallClass, analyze,
    classify_rainfall, generate_alerts, pest_risk,
};
pub use tasks::suggest_tasks;
