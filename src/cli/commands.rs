//! Command implementations for the agromet processor CLI
//!
//! Opens the uploaded export, runs the ingestion pipeline, derives the
//! summary metrics, and renders the results. All domain logic lives in the
//! service modules; this layer only wires them to the terminal.

use chrono::{Local, NaiveDate};
use colored::Colorize;
use serde::Serialize;
use std::fs::File;
use tracing::{info, warn};

use crate::app::models::{CropProfile, Observation, WeatherSeries};
use crate::app::services::advisory::{self, Alert, AlertSeverity, ForecastPoint};
use crate::app::services::gdd_accumulator;
use crate::app::services::ingest::{self, IngestResult};
use crate::app::services::reference_tables;
use crate::app::services::schema_normalizer::NormalizeStats;
use crate::app::services::series_queries::{self, DailySummary};
use crate::cli::args::{AnalyzeArgs, Args, Commands, OutputFormat, ReferenceArgs};
use crate::config::IngestConfig;
use crate::constants::{MOVING_AVERAGE_WINDOW, columns};
use crate::{Error, Result};

/// Full analysis of one station export, serializable for scripting
#[derive(Debug, Serialize)]
pub struct AnalysisReport {
    pub file: String,
    pub format: String,
    pub crop: String,
    pub base_temperature: f64,
    pub observations: usize,
    pub columns: Vec<String>,
    pub summary: DailySummary,
    pub accumulated_gdd: Option<f64>,
    pub gdd_gaps: Option<usize>,
    pub trends: Vec<TrendLine>,
    pub alerts: Vec<Alert>,
    pub tasks: Vec<String>,
    pub data_quality: NormalizeStats,
}

/// Latest smoothed value of one charted column over the trend window
#[derive(Debug, Serialize)]
pub struct TrendLine {
    pub column: String,
    pub window_observations: usize,
    pub latest_smoothed: Option<f64>,
}

/// Main command dispatcher
pub fn run(args: Args) -> Result<()> {
    match args.command {
        Some(Commands::Analyze(analyze_args)) => run_analyze(analyze_args),
        Some(Commands::Reference(reference_args)) => run_reference(reference_args),
        None => unreachable!("main shows help when no command is given"),
    }
}

/// Run the full pipeline over one export and render the report
fn run_analyze(args: AnalyzeArgs) -> Result<()> {
    setup_logging(args.log_level());
    args.validate()?;

    let crop = resolve_crop(&args)?;
    info!(
        "Analyzing {} for {} (base {} °C)",
        args.input_path.display(),
        crop.name,
        crop.base_temperature
    );

    let config = IngestConfig {
        delimiter: args.delimiter as u8,
        ..Default::default()
    };

    let mut file = File::open(&args.input_path)
        .map_err(|e| Error::io(format!("failed to open {}", args.input_path.display()), e))?;
    let result = ingest::ingest(&mut file, &config)?;

    let summary_date = args
        .summary_date
        .unwrap_or_else(|| Local::now().date_naive());

    let report = build_report(&args, &crop, summary_date, result)?;

    match args.output_format {
        OutputFormat::Human => print_report(&report),
        OutputFormat::Json => {
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|e| Error::configuration(format!("failed to render JSON: {}", e)))?;
            println!("{}", rendered);
        }
    }

    Ok(())
}

fn build_report(
    args: &AnalyzeArgs,
    crop: &CropProfile,
    summary_date: NaiveDate,
    result: IngestResult,
) -> Result<AnalysisReport> {
    let series = &result.series;

    // A missing temperature schema invalidates the GDD metric only; the
    // rest of the report still stands
    let (accumulated_gdd, gdd_gaps) =
        match gdd_accumulator::accumulate(series, crop, args.reset_date) {
            Ok(points) => {
                let gaps = points.iter().filter(|point| point.daily.is_none()).count();
                (points.last().map(|point| point.cumulative), Some(gaps))
            }
            Err(Error::MetricPrecondition { metric, message }) => {
                warn!("{} unavailable: {}", metric, message);
                (None, None)
            }
            Err(other) => return Err(other),
        };

    let summary = series_queries::daily_summary(series, summary_date, crop.base_temperature);

    let reference = summary_date
        .and_hms_opt(23, 59, 59)
        .unwrap_or_else(|| Local::now().naive_local());
    let window = series_queries::within_last_days(series, reference, args.window_days);
    let trends = trend_lines(series, &window);

    let today = series_queries::on_date(series, summary_date);
    let forecast: Vec<ForecastPoint> = today
        .iter()
        .map(|obs| ForecastPoint {
            rain_mm: obs.value(columns::PRECIPITATION).unwrap_or(0.0),
            temperature: obs.value(columns::TEMP_AVG).unwrap_or(0.0),
            humidity: obs.value(columns::HUMIDITY_AVG).unwrap_or(70.0),
        })
        .collect();

    let alerts = advisory::generate_alerts(&forecast, accumulated_gdd);
    let tasks = advisory::suggest_tasks(&forecast, accumulated_gdd);

    Ok(AnalysisReport {
        file: args.input_path.display().to_string(),
        format: result.format.name().to_string(),
        crop: crop.name.clone(),
        base_temperature: crop.base_temperature,
        observations: series.len(),
        columns: series.columns.clone(),
        summary,
        accumulated_gdd,
        gdd_gaps,
        trends,
        alerts,
        tasks,
        data_quality: result.stats,
    })
}

/// Smoothed trend figures for the canonical charted columns
fn trend_lines(series: &WeatherSeries, window: &[&Observation]) -> Vec<TrendLine> {
    let windowed = WeatherSeries {
        columns: series.columns.clone(),
        observations: window.iter().map(|obs| (*obs).clone()).collect(),
    };

    [
        columns::PRECIPITATION,
        columns::TEMP_AVG,
        columns::HUMIDITY_MIN,
    ]
    .into_iter()
    .filter(|column| series.has_column(column))
    .map(|column| {
        let smoothed = series_queries::moving_average(&windowed, column, MOVING_AVERAGE_WINDOW);
        TrendLine {
            column: column.to_string(),
            window_observations: windowed.len(),
            latest_smoothed: smoothed.into_iter().rev().flatten().next(),
        }
    })
    .collect()
}

fn resolve_crop(args: &AnalyzeArgs) -> Result<CropProfile> {
    match (&args.crop, args.base_temperature) {
        // An explicit threshold wins; the name stays for display
        (Some(name), Some(base)) => Ok(CropProfile::new(name.trim(), base)),
        (Some(name), None) => reference_tables::crop_profile(name),
        (None, Some(base)) => Ok(CropProfile::new("Custom crop", base)),
        (None, None) => Err(Error::configuration(
            "either --crop or --base-temp is required".to_string(),
        )),
    }
}

fn print_report(report: &AnalysisReport) {
    println!("{}", "Weather data loaded".green().bold());
    println!(
        "  {} observation(s) from {} input",
        report.observations, report.format
    );
    println!(
        "  Crop: {} (base {} °C)",
        report.crop.as_str().bold(),
        report.base_temperature
    );
    println!("  Available columns: {}", report.columns.join(", "));

    println!();
    println!(
        "{} ({})",
        "Daily summary".bold(),
        report.summary.date.format("%Y-%m-%d")
    );
    print_metric("Rainfall", report.summary.rainfall_total, "mm");
    print_metric("Avg temperature", report.summary.mean_temperature, "°C");
    print_metric("Min humidity", report.summary.min_humidity, "%");
    print_metric("Heat units", report.summary.heat_units, "°C·d");

    println!();
    println!("{}", "Growing degree days".bold());
    print_metric("Accumulated", report.accumulated_gdd, "°C·d");
    match report.gdd_gaps {
        Some(0) => {}
        Some(gaps) => println!("  {} observation(s) lacked temperature data", gaps),
        None => println!("  {}", "No usable temperature columns".yellow()),
    }

    if !report.trends.is_empty() {
        println!();
        println!("{}", "Trends (smoothed)".bold());
        for trend in &report.trends {
            print_metric(&trend.column, trend.latest_smoothed, "");
        }
    }

    if !report.alerts.is_empty() {
        println!();
        println!("{}", "Alerts".bold());
        for alert in &report.alerts {
            let line = match alert.severity {
                AlertSeverity::Critical => alert.message.red().to_string(),
                AlertSeverity::Warning => alert.message.yellow().to_string(),
                AlertSeverity::Info => alert.message.normal().to_string(),
            };
            println!("  {}", line);
        }
    }

    if !report.tasks.is_empty() {
        println!();
        println!("{}", "Suggested tasks".bold());
        for task in &report.tasks {
            println!("  - {}", task);
        }
    }

    let stats = &report.data_quality;
    if !stats.is_clean() {
        println!();
        println!("{}", "Data quality".bold());
        if stats.padded_rows + stats.truncated_rows > 0 {
            println!(
                "  {} row(s) padded, {} truncated",
                stats.padded_rows, stats.truncated_rows
            );
        }
        if !stats.dropped_columns.is_empty() {
            println!("  Dropped empty columns: {}", stats.dropped_columns.join(", "));
        }
        if stats.timestamp_gaps > 0 {
            println!("  {} unparsable timestamp(s)", stats.timestamp_gaps);
        }
        if stats.out_of_order_timestamps > 0 {
            println!(
                "  {}",
                format!(
                    "{} out-of-order timestamp(s); series kept in source order",
                    stats.out_of_order_timestamps
                )
                .yellow()
            );
        }
        let mut gap_columns: Vec<(&String, &usize)> = stats.null_counts.iter().collect();
        gap_columns.sort();
        for (column, nulls) in gap_columns {
            println!("  {}: {} null cell(s)", column, nulls);
        }
    }
}

fn print_metric(label: &str, value: Option<f64>, unit: &str) {
    match value {
        Some(value) => println!("  {}: {:.2} {}", label, value, unit),
        None => println!("  {}: {}", label, "no data".dimmed()),
    }
}

/// Print the crop and pest reference tables
fn run_reference(args: ReferenceArgs) -> Result<()> {
    let crops = reference_tables::crop_profiles();
    let pests = reference_tables::pest_profiles();

    match args.output_format {
        OutputFormat::Json => {
            let payload = serde_json::json!({ "crops": crops, "pests": pests });
            let rendered = serde_json::to_string_pretty(&payload)
                .map_err(|e| Error::configuration(format!("failed to render JSON: {}", e)))?;
            println!("{}", rendered);
        }
        OutputFormat::Human => {
            println!("{}", "Crop base temperatures".bold());
            for crop in &crops {
                println!("  {:<16} {:>5.1} °C", crop.name, crop.base_temperature);
            }

            println!();
            println!("{}", "Pest optimal temperature ranges".bold());
            for pest in &pests {
                println!(
                    "  {:<16} {:>4.1}–{:<4.1} °C  {}",
                    pest.name, pest.optimal_min, pest.optimal_max, pest.note
                );
            }
        }
    }

    Ok(())
}

fn setup_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
