use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, info};

use crate::domain::forecast::{ForecastRow, ForecastTable, PercentileValue};
use crate::domain::history::HistorySample;
use crate::services::percentiles::value_sorted;
use crate::services::sampler::{CycleTimeSampler, RandomSampler};
use crate::services::simulation_config::{HistoryPolicy, SimulationConfig};

/// Trials handled by one generator. Fixed so a seeded run gives the same
/// result whatever the number of worker threads.
const TRIALS_PER_CHUNK: usize = 1_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("insufficient data: {0}")]
    InsufficientData(String),
}

#[derive(Debug, Clone)]
pub struct SimulationOutput {
    pub table: ForecastTable,
    /// Cumulative times per position, sorted ascending, one value per trial.
    pub distributions: Vec<Vec<f64>>,
    pub history_used: usize,
}

struct RunPlan<'a> {
    window: &'a [f64],
    backlog_size: usize,
    trials: usize,
    percentiles: Vec<u32>,
}

/// Runs the forecast with independently seeded generators per chunk of
/// trials, spread over the rayon pool.
pub fn run(
    history: &HistorySample,
    config: &SimulationConfig,
) -> Result<SimulationOutput, SimulationError> {
    let plan = validate(history, config)?;
    let seed = config.seed.unwrap_or_else(rand::random::<u64>);
    let started = Instant::now();

    let chunk_count = plan.trials.div_ceil(TRIALS_PER_CHUNK);
    let columns = (0..chunk_count)
        .into_par_iter()
        .map(|chunk| {
            let first_trial = chunk * TRIALS_PER_CHUNK;
            let trials = TRIALS_PER_CHUNK.min(plan.trials - first_trial);
            let rng = StdRng::seed_from_u64(seed.wrapping_add(chunk as u64));
            let mut sampler = RandomSampler::new(rng);
            simulate_trials(plan.window, plan.backlog_size, trials, &mut sampler)
        })
        .collect::<Vec<_>>()
        .into_iter()
        .reduce(|mut merged, part| {
            for (column, values) in merged.iter_mut().zip(part) {
                column.extend(values);
            }
            merged
        })
        .unwrap_or_else(|| empty_columns(plan.backlog_size, 0));

    let output = aggregate(columns, &plan);
    info!(
        backlog_size = plan.backlog_size,
        trials = plan.trials,
        history_used = plan.window.len(),
        chunks = chunk_count,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation finished"
    );
    Ok(output)
}

/// Same contract as [`run`], drawing every trial from `sampler` on the
/// calling thread.
pub fn run_with_sampler<S: CycleTimeSampler + ?Sized>(
    history: &HistorySample,
    config: &SimulationConfig,
    sampler: &mut S,
) -> Result<SimulationOutput, SimulationError> {
    let plan = validate(history, config)?;
    let columns = simulate_trials(plan.window, plan.backlog_size, plan.trials, sampler);
    Ok(aggregate(columns, &plan))
}

fn validate<'a>(
    history: &'a HistorySample,
    config: &SimulationConfig,
) -> Result<RunPlan<'a>, SimulationError> {
    if config.backlog_size == 0 {
        return Err(SimulationError::InvalidConfig(
            "backlog size must be positive".to_string(),
        ));
    }

    let bounds = config.trial_bounds;
    if bounds.min > bounds.max {
        return Err(SimulationError::InvalidConfig(format!(
            "trial bounds are inverted: {} > {}",
            bounds.min, bounds.max
        )));
    }
    if config.trials == 0 || !bounds.contains(config.trials) {
        return Err(SimulationError::InvalidConfig(format!(
            "trial count out of range: {} is not within [{}, {}]",
            config.trials, bounds.min, bounds.max
        )));
    }

    if history.is_empty() {
        return Err(SimulationError::InsufficientData(
            "history is empty".to_string(),
        ));
    }
    let window = history.window(config.history_window);
    if config.history_policy == HistoryPolicy::RequireBacklogCoverage
        && window.len() < config.backlog_size
    {
        return Err(SimulationError::InsufficientData(format!(
            "not enough data in selected history size ({}) for N={}",
            window.len(),
            config.backlog_size
        )));
    }

    if config.percentiles.is_empty() {
        return Err(SimulationError::InvalidConfig(
            "at least one percentile must be requested".to_string(),
        ));
    }
    if let Some(percentile) = config.percentiles.iter().find(|p| **p > 100) {
        return Err(SimulationError::InvalidConfig(format!(
            "percentile {percentile} is outside [0, 100]"
        )));
    }
    let mut percentiles = config.percentiles.clone();
    percentiles.sort_unstable();
    percentiles.dedup();

    debug!(
        backlog_size = config.backlog_size,
        trials = config.trials,
        history_len = history.len(),
        history_used = window.len(),
        ?percentiles,
        "simulation config validated"
    );

    Ok(RunPlan {
        window,
        backlog_size: config.backlog_size,
        trials: config.trials,
        percentiles,
    })
}

fn empty_columns(backlog_size: usize, trials: usize) -> Vec<Vec<f64>> {
    (0..backlog_size)
        .map(|_| Vec::with_capacity(trials))
        .collect()
}

/// Column `k` of the result holds, for every trial, the elapsed time once
/// the first `k + 1` items are done.
fn simulate_trials<S: CycleTimeSampler + ?Sized>(
    window: &[f64],
    backlog_size: usize,
    trials: usize,
    sampler: &mut S,
) -> Vec<Vec<f64>> {
    let mut columns = empty_columns(backlog_size, trials);
    for _ in 0..trials {
        let mut elapsed = 0.0_f64;
        for (column, cycle_time) in columns.iter_mut().zip(sampler.draw(window, backlog_size)) {
            elapsed += cycle_time;
            column.push(elapsed);
        }
    }
    columns
}

fn aggregate(mut columns: Vec<Vec<f64>>, plan: &RunPlan<'_>) -> SimulationOutput {
    columns
        .par_iter_mut()
        .for_each(|column| column.sort_unstable_by(f64::total_cmp));

    let rows = columns
        .iter()
        .enumerate()
        .map(|(index, column)| ForecastRow {
            position: index + 1,
            values: plan
                .percentiles
                .iter()
                .map(|percentile| PercentileValue {
                    percentile: *percentile,
                    value: value_sorted(column, f64::from(*percentile)).unwrap_or(0.0),
                })
                .collect(),
        })
        .collect();

    SimulationOutput {
        table: ForecastTable {
            percentiles: plan.percentiles.clone(),
            rows,
        },
        distributions: columns,
        history_used: plan.window.len(),
    }
}
