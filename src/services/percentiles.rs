/// Percentile helpers for already-sorted slices.
///
/// - Empty input => `None`.
/// - `percentile <= 0` => first element.
/// - `percentile >= 100` => last element.
/// - Otherwise the rank `percentile / 100 * (len - 1)` is computed and the
///   value is linearly interpolated between the order statistics at
///   `floor(rank)` and `ceil(rank)`.

/// Returns the interpolated percentile of a slice sorted in ascending order.
pub fn value_sorted(sorted_values: &[f64], percentile: f64) -> Option<f64> {
    let last = sorted_values.len().checked_sub(1)?;
    if percentile <= 0.0 {
        return sorted_values.first().copied();
    }
    if percentile >= 100.0 {
        return sorted_values.get(last).copied();
    }

    let rank = (percentile / 100.0) * last as f64;
    let lower = rank.floor() as usize;
    let upper = (rank.ceil() as usize).min(last);
    let low_value = sorted_values[lower];
    let high_value = sorted_values[upper];
    Some(low_value + (high_value - low_value) * (rank - lower as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_sorted_returns_none_for_empty_input() {
        let values: [f64; 0] = [];
        assert_eq!(value_sorted(&values, 50.0), None);
    }

    #[test]
    fn value_sorted_clamps_to_first_and_last() {
        let values = [10.0, 20.0, 30.0];
        assert_eq!(value_sorted(&values, -1.0), Some(10.0));
        assert_eq!(value_sorted(&values, 0.0), Some(10.0));
        assert_eq!(value_sorted(&values, 100.0), Some(30.0));
        assert_eq!(value_sorted(&values, 1000.0), Some(30.0));
    }

    #[test]
    fn value_sorted_hits_order_statistics_on_whole_ranks() {
        // len=5 => ranks 0..=4
        let values = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(value_sorted(&values, 25.0), Some(1.0));
        assert_eq!(value_sorted(&values, 50.0), Some(2.0));
        assert_eq!(value_sorted(&values, 75.0), Some(3.0));
    }

    #[test]
    fn value_sorted_interpolates_between_ranks() {
        // len=4 => p50 rank=1.5, p80 rank=2.4
        let values = [1.0, 2.0, 4.0, 8.0];
        assert_eq!(value_sorted(&values, 50.0), Some(3.0));
        let p80 = value_sorted(&values, 80.0).unwrap();
        assert!((p80 - 5.6).abs() < 1e-12);
    }

    #[test]
    fn value_sorted_single_value() {
        assert_eq!(value_sorted(&[7.5], 85.0), Some(7.5));
    }
}
