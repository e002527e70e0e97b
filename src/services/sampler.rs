use rand::Rng;
use rand::seq::SliceRandom;

/// Source of the random draws a trial is built from.
pub trait CycleTimeSampler {
    /// Draws `count` values uniformly and with replacement from `population`.
    fn draw(&mut self, population: &[f64], count: usize) -> Vec<f64>;
}

pub struct RandomSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomSampler<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> CycleTimeSampler for RandomSampler<R> {
    fn draw(&mut self, population: &[f64], count: usize) -> Vec<f64> {
        (0..count)
            .filter_map(|_| population.choose(&mut self.rng).copied())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn draw_returns_requested_count_from_population() {
        let population = [6.0, 8.0, 7.0, 5.0, 9.0];
        let mut sampler = RandomSampler::new(StdRng::seed_from_u64(7));

        let drawn = sampler.draw(&population, 50);

        assert_eq!(drawn.len(), 50);
        assert!(drawn.iter().all(|value| population.contains(value)));
    }

    #[test]
    fn draw_repeats_values_with_replacement() {
        let mut sampler = RandomSampler::new(StdRng::seed_from_u64(1));
        assert_eq!(sampler.draw(&[4.0], 3), vec![4.0, 4.0, 4.0]);
    }

    #[test]
    fn same_seed_draws_same_sequence() {
        let population = [1.0, 2.0, 3.0, 4.0];
        let mut first = RandomSampler::new(StdRng::seed_from_u64(99));
        let mut second = RandomSampler::new(StdRng::seed_from_u64(99));
        assert_eq!(first.draw(&population, 20), second.draw(&population, 20));
    }
}
