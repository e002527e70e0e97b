use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::services::simulation_config::{
    DEFAULT_HISTORY_WINDOW, DEFAULT_PERCENTILES, DEFAULT_TRIALS, HistoryPolicy,
    SimulationConfig, TrialBounds,
};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    ReadFile { path: PathBuf, source: io::Error },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("backlog size is required (pass --backlog-size or set backlog_size)")]
    MissingBacklogSize,
}

/// Forecast parameters as given by a settings file or the command line.
/// Unset fields fall back to the next source, then to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ForecastSettings {
    pub backlog_size: Option<usize>,
    pub trials: Option<usize>,
    pub history_window: Option<usize>,
    pub percentiles: Option<Vec<u32>>,
    pub seed: Option<u64>,
    pub min_trials: Option<usize>,
    pub max_trials: Option<usize>,
    pub allow_short_history: Option<bool>,
}

impl ForecastSettings {
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        serde_yaml::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fields set in `overrides` replace the ones in `self`.
    pub fn merge(self, overrides: ForecastSettings) -> Self {
        Self {
            backlog_size: overrides.backlog_size.or(self.backlog_size),
            trials: overrides.trials.or(self.trials),
            history_window: overrides.history_window.or(self.history_window),
            percentiles: overrides.percentiles.or(self.percentiles),
            seed: overrides.seed.or(self.seed),
            min_trials: overrides.min_trials.or(self.min_trials),
            max_trials: overrides.max_trials.or(self.max_trials),
            allow_short_history: overrides.allow_short_history.or(self.allow_short_history),
        }
    }

    pub fn into_simulation_config(self) -> Result<SimulationConfig, SettingsError> {
        let backlog_size = self.backlog_size.ok_or(SettingsError::MissingBacklogSize)?;
        let defaults = TrialBounds::default();
        let trial_bounds = TrialBounds {
            min: self.min_trials.unwrap_or(defaults.min),
            max: self.max_trials.unwrap_or(defaults.max),
        };
        let history_policy = if self.allow_short_history.unwrap_or(false) {
            HistoryPolicy::AnyNonEmpty
        } else {
            HistoryPolicy::RequireBacklogCoverage
        };

        Ok(SimulationConfig::new(
            backlog_size,
            self.trials.unwrap_or(DEFAULT_TRIALS),
            self.percentiles
                .unwrap_or_else(|| DEFAULT_PERCENTILES.to_vec()),
        )
        .with_history_window(Some(self.history_window.unwrap_or(DEFAULT_HISTORY_WINDOW)))
        .with_trial_bounds(trial_bounds)
        .with_history_policy(history_policy)
        .with_seed(self.seed))
    }
}
