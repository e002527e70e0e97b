use clap::{ArgAction, Args, Parser, Subcommand};
use clap_complete::Shell;

use crate::services::settings_yaml::ForecastSettings;

#[derive(Parser)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Forecast delivery times per backlog position from cycle time history
    Forecast(ForecastArgs),
    /// Explain how the Monte Carlo forecast works
    Explain,
    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ForecastArgs {
    /// Cycle time history file (CSV with a header row, Excel workbook, or YAML list)
    #[arg(short = 'f', long)]
    pub history: String,
    /// Output report file (YAML, or JSON when it ends in .json)
    #[arg(short, long)]
    pub output: Option<String>,
    /// Number of backlog items to forecast
    #[arg(short = 'n', long)]
    pub backlog_size: Option<usize>,
    /// Number of simulation trials [default: 10000]
    #[arg(short, long)]
    pub trials: Option<usize>,
    /// Only sample the most recent cycle times [default: 1000]
    #[arg(short = 'w', long)]
    pub history_window: Option<usize>,
    /// Percentiles to report, e.g. 50,80,P90 [default: 50]
    #[arg(short, long, value_delimiter = ',', value_parser = parse_percentile)]
    pub percentiles: Option<Vec<u32>>,
    /// Seed for a reproducible forecast
    #[arg(long)]
    pub seed: Option<u64>,
    /// Accept a history window shorter than the backlog size
    #[arg(long)]
    pub allow_short_history: bool,
    /// Convert forecast days to working-day dates from this date (YYYY-MM-DD)
    #[arg(short, long)]
    pub start_date: Option<String>,
    /// Write a PNG chart of the percentile curves
    #[arg(long)]
    pub plot: Option<String>,
    /// Write a PNG histogram of the last position's simulated times
    #[arg(long)]
    pub histogram: Option<String>,
    /// Settings YAML file; command line flags take precedence
    #[arg(short, long)]
    pub config: Option<String>,
}

impl ForecastArgs {
    pub fn settings(&self) -> ForecastSettings {
        ForecastSettings {
            backlog_size: self.backlog_size,
            trials: self.trials,
            history_window: self.history_window,
            percentiles: self.percentiles.clone(),
            seed: self.seed,
            min_trials: None,
            max_trials: None,
            allow_short_history: self.allow_short_history.then_some(true),
        }
    }
}

/// Accepts `80` as well as the `P80` label used in reports.
fn parse_percentile(value: &str) -> Result<u32, String> {
    let digits = value
        .trim()
        .strip_prefix(['P', 'p'])
        .unwrap_or(value.trim());
    digits
        .parse::<u32>()
        .map_err(|_| format!("invalid percentile: {value}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_forecast(extra: &[&str]) -> ForecastArgs {
        let mut argv = vec!["cycletime-forecast", "forecast", "-f", "history.csv"];
        argv.extend_from_slice(extra);
        match CliArgs::parse_from(argv).command {
            Commands::Forecast(args) => args,
            _ => panic!("expected forecast command"),
        }
    }

    #[test]
    fn forecast_leaves_unset_values_to_settings() {
        let args = parse_forecast(&[]);

        assert_eq!(args.settings(), ForecastSettings::default());
        assert_eq!(args.output, None);
    }

    #[test]
    fn forecast_parses_percentile_list_with_labels() {
        let args = parse_forecast(&["-n", "5", "-p", "50,P85,p90"]);

        assert_eq!(args.backlog_size, Some(5));
        assert_eq!(args.percentiles, Some(vec![50, 85, 90]));
    }

    #[test]
    fn forecast_rejects_non_numeric_percentiles() {
        let result = CliArgs::try_parse_from([
            "cycletime-forecast",
            "forecast",
            "-f",
            "history.csv",
            "-p",
            "median",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn allow_short_history_flag_maps_to_setting() {
        let args = parse_forecast(&["--allow-short-history", "--seed", "3"]);
        let settings = args.settings();

        assert_eq!(settings.allow_short_history, Some(true));
        assert_eq!(settings.seed, Some(3));
    }

    #[test]
    fn verbose_counts_repetitions() {
        let args = CliArgs::parse_from(["cycletime-forecast", "-vv", "explain"]);
        assert_eq!(args.verbose, 2);
    }
}
