pub const DEFAULT_MIN_TRIALS: usize = 10_000;
pub const DEFAULT_MAX_TRIALS: usize = 30_000;
pub const DEFAULT_TRIALS: usize = 10_000;
pub const DEFAULT_HISTORY_WINDOW: usize = 1_000;
pub const DEFAULT_PERCENTILES: [u32; 1] = [50];

/// Inclusive range of trial counts a run is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialBounds {
    pub min: usize,
    pub max: usize,
}

impl Default for TrialBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_TRIALS,
            max: DEFAULT_MAX_TRIALS,
        }
    }
}

impl TrialBounds {
    pub fn contains(&self, trials: usize) -> bool {
        (self.min..=self.max).contains(&trials)
    }
}

/// How much history a run needs relative to the backlog size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPolicy {
    /// The history window must hold at least as many values as backlog items.
    #[default]
    RequireBacklogCoverage,
    /// Any non-empty window is enough since draws are made with replacement.
    AnyNonEmpty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub backlog_size: usize,
    pub trials: usize,
    pub percentiles: Vec<u32>,
    /// Only the most recent values of the history are sampled when set.
    pub history_window: Option<usize>,
    pub trial_bounds: TrialBounds,
    pub history_policy: HistoryPolicy,
    /// Fixed seed for reproducible runs. Fresh entropy is used when absent.
    pub seed: Option<u64>,
}

impl SimulationConfig {
    pub fn new(backlog_size: usize, trials: usize, percentiles: Vec<u32>) -> Self {
        Self {
            backlog_size,
            trials,
            percentiles,
            history_window: None,
            trial_bounds: TrialBounds::default(),
            history_policy: HistoryPolicy::default(),
            seed: None,
        }
    }

    pub fn with_history_window(mut self, history_window: Option<usize>) -> Self {
        self.history_window = history_window;
        self
    }

    pub fn with_trial_bounds(mut self, trial_bounds: TrialBounds) -> Self {
        self.trial_bounds = trial_bounds;
        self
    }

    pub fn with_history_policy(mut self, history_policy: HistoryPolicy) -> Self {
        self.history_policy = history_policy;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bounds_are_inclusive() {
        let bounds = TrialBounds::default();
        assert!(bounds.contains(10_000));
        assert!(bounds.contains(30_000));
        assert!(!bounds.contains(9_999));
        assert!(!bounds.contains(30_001));
    }

    #[test]
    fn new_uses_strict_defaults() {
        let config = SimulationConfig::new(3, 10_000, vec![50]);
        assert_eq!(config.history_window, None);
        assert_eq!(config.history_policy, HistoryPolicy::RequireBacklogCoverage);
        assert_eq!(config.trial_bounds, TrialBounds::default());
        assert_eq!(config.seed, None);
    }
}
