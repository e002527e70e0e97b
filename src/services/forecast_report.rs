use std::path::Path;

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use thiserror::Error;

use crate::services::simulation::SimulationOutput;
use crate::services::simulation_config::SimulationConfig;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to serialize report as yaml: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to serialize report as json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write report: {0}")]
    Write(#[from] std::io::Error),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastPercentile {
    pub percentile: u32,
    pub days: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastReportRow {
    pub position: usize,
    pub percentiles: Vec<ForecastPercentile>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub data_source: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    pub trials: usize,
    pub backlog_size: usize,
    pub history_used: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    pub rows: Vec<ForecastReportRow>,
}

pub fn build_forecast_report(
    output: &SimulationOutput,
    config: &SimulationConfig,
    data_source: &str,
    start_date: Option<NaiveDate>,
) -> ForecastReport {
    let rows = output
        .table
        .rows
        .iter()
        .map(|row| ForecastReportRow {
            position: row.position,
            percentiles: row
                .values
                .iter()
                .map(|entry| ForecastPercentile {
                    percentile: entry.percentile,
                    days: entry.value,
                    date: start_date.map(|start| {
                        end_date_from_days(start, entry.value)
                            .format("%Y-%m-%d")
                            .to_string()
                    }),
                })
                .collect(),
        })
        .collect();

    ForecastReport {
        data_source: data_source_name(data_source),
        start_date: start_date.map(|date| date.format("%Y-%m-%d").to_string()),
        trials: config.trials,
        backlog_size: config.backlog_size,
        history_used: output.history_used,
        seed: config.seed,
        rows,
    }
}

/// Writes the report as JSON when `output_path` ends in `.json`, as YAML
/// otherwise.
pub fn write_report(output_path: &str, report: &ForecastReport) -> Result<(), ReportError> {
    let is_json = Path::new(output_path)
        .extension()
        .and_then(|extension| extension.to_str())
        .map(|extension| extension.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let contents = if is_json {
        serde_json::to_string_pretty(report)?
    } else {
        serde_yaml::to_string(report)?
    };
    std::fs::write(output_path, contents)?;
    Ok(())
}

pub fn data_source_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
        .to_string()
}

/// Working day on which `days` of work starting at `start_date` are done.
fn end_date_from_days(start_date: NaiveDate, days: f64) -> NaiveDate {
    let days = days.ceil().max(0.0) as u64;
    let mut date = next_workday(start_date);
    for _ in 1..days {
        match date.succ_opt() {
            Some(next) => date = next_workday(next),
            None => break,
        }
    }
    date
}

fn next_workday(mut date: NaiveDate) -> NaiveDate {
    while is_weekend(date) {
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }
    date
}

fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
