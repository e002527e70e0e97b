use crate::domain::history::HistorySample;
use crate::services::sampler::CycleTimeSampler;

/// A mock sampler that walks the population in order, wrapping around, and
/// continues where the previous draw stopped.
pub struct SequenceSampler {
    next: usize,
}

impl SequenceSampler {
    pub fn new() -> Self {
        Self { next: 0 }
    }
}

impl CycleTimeSampler for SequenceSampler {
    fn draw(&mut self, population: &[f64], count: usize) -> Vec<f64> {
        let drawn = (0..count)
            .map(|offset| population[(self.next + offset) % population.len()])
            .collect();
        self.next += count;
        drawn
    }
}

pub fn history_of(values: &[f64]) -> HistorySample {
    HistorySample::new(values.to_vec()).unwrap()
}

pub fn on_date(year: i32, month: u32, day: u32) -> chrono::NaiveDate {
    chrono::NaiveDate::from_ymd_opt(year, month, day).unwrap()
}
