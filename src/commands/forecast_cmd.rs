use std::process::ExitCode;

use chrono::NaiveDate;
use thiserror::Error;
use tracing::info;

use crate::commands::base_commands::ForecastArgs;
use crate::commands::report_format::format_forecast_report;
use crate::services::forecast_plot::{ForecastPlotError, write_forecast_plot_png};
use crate::services::forecast_report::{
    ForecastReport, ReportError, build_forecast_report, write_report,
};
use crate::services::histogram::{HistogramError, write_histogram_png};
use crate::services::history_loader::{HistoryLoadError, load_history};
use crate::services::settings_yaml::{ForecastSettings, SettingsError};
use crate::services::simulation::{self, SimulationError};

#[derive(Error, Debug)]
pub enum ForecastCommandError {
    #[error("{0}")]
    Settings(#[from] SettingsError),
    #[error("invalid start date: {0}")]
    InvalidStartDate(String),
    #[error("{0}")]
    History(#[from] HistoryLoadError),
    #[error("{0}")]
    Simulation(#[from] SimulationError),
    #[error("{0}")]
    Report(#[from] ReportError),
    #[error("{0}")]
    Plot(#[from] ForecastPlotError),
    #[error("{0}")]
    Histogram(#[from] HistogramError),
}

pub fn forecast_command(args: ForecastArgs) -> ExitCode {
    let report = match run_forecast(&args) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Failed to run forecast: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!("{}", format_forecast_report(&report));
    if let Some(output) = &args.output {
        println!("Forecast for {} items written to {output}", report.backlog_size);
    }
    if let Some(plot) = &args.plot {
        println!("Forecast plot written to {plot}");
    }
    if let Some(histogram) = &args.histogram {
        println!("Forecast histogram written to {histogram}");
    }
    ExitCode::SUCCESS
}

fn run_forecast(args: &ForecastArgs) -> Result<ForecastReport, ForecastCommandError> {
    let file_settings = match &args.config {
        Some(path) => ForecastSettings::from_yaml_file(path)?,
        None => ForecastSettings::default(),
    };
    let config = file_settings.merge(args.settings()).into_simulation_config()?;
    let start_date = args
        .start_date
        .as_deref()
        .map(parse_start_date)
        .transpose()?;

    let history = load_history(&args.history)?;
    info!(
        history = %args.history,
        values = history.len(),
        backlog_size = config.backlog_size,
        trials = config.trials,
        "running forecast"
    );
    let output = simulation::run(&history, &config)?;
    let report = build_forecast_report(&output, &config, &args.history, start_date);

    if let Some(path) = &args.output {
        write_report(path, &report)?;
    }
    if let Some(path) = &args.plot {
        write_forecast_plot_png(path, &output.table)?;
    }
    if let Some(path) = &args.histogram {
        let last_position = output.distributions.last().map(Vec::as_slice).unwrap_or(&[]);
        write_histogram_png(path, output.table.rows.len(), last_position)?;
    }
    Ok(report)
}

fn parse_start_date(value: &str) -> Result<NaiveDate, ForecastCommandError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| ForecastCommandError::InvalidStartDate(value.to_string()))
}
