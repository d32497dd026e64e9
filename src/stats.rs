//! Summary statistics over per-trial arrays.
//!
//! Percentiles use linear interpolation between closest ranks, so the
//! 50th percentile of an even-length sample is the midpoint of the two
//! central values.

use serde::Serialize;

pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

pub fn sorted(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// `p` is in percent (0-100). `sorted` must be ascending.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }

    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let rank = (p / 100.0) * (n as f64 - 1.0);
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;

    if lower == upper {
        sorted[lower]
    } else {
        let w = rank - lower as f64;
        sorted[lower] * (1.0 - w) + sorted[upper] * w
    }
}

pub fn percentile(values: &mut [f64], p: f64) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    percentile_sorted(values, p)
}

pub fn median(values: &mut [f64]) -> f64 {
    percentile(values, 50.0)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Summary {
    pub mean: f64,
    pub median: f64,
    pub percentile_5: f64,
    pub percentile_95: f64,
}

impl Summary {
    pub const ZERO: Self = Self {
        mean: 0.0,
        median: 0.0,
        percentile_5: 0.0,
        percentile_95: 0.0,
    };

    pub fn of(values: &[f64]) -> Self {
        let sorted = sorted(values);
        Self {
            mean: mean(values),
            median: percentile_sorted(&sorted, 50.0),
            percentile_5: percentile_sorted(&sorted, 5.0),
            percentile_95: percentile_sorted(&sorted, 95.0),
        }
    }

    /// Center (mean/median) from `subset`, tails from `all`. An empty
    /// subset falls back to `all`.
    pub fn conditional(all: &[f64], subset: &[f64]) -> Self {
        let tails = Self::of(all);
        if subset.is_empty() {
            return tails;
        }
        let center = sorted(subset);
        Self {
            mean: mean(subset),
            median: percentile_sorted(&center, 50.0),
            ..tails
        }
    }
}

/// Fraction of `total` matching; 0 for an empty population.
pub fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    count as f64 / total as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::{prop_assert, proptest};

    const EPS: f64 = 1e-9;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_percentile_interpolates_between_points() {
        let mut values = vec![1.0, 2.0, 3.0, 4.0];
        assert_approx(percentile(&mut values, 25.0), 1.75);
        assert_approx(percentile(&mut values, 5.0), 1.15);
        assert_approx(percentile(&mut values, 95.0), 3.85);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_approx(median(&mut [4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_approx(median(&mut [5.0, 1.0, 3.0]), 3.0);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(percentile(&mut [], 50.0), 0.0);
        assert_eq!(fraction(3, 0), 0.0);
        assert_eq!(Summary::of(&[]), Summary::ZERO);
    }

    #[test]
    fn test_conditional_uses_subset_center_and_full_tails() {
        let all: Vec<f64> = (0..=100).map(|i| i as f64).collect();
        let subset = [50.0, 60.0];
        let summary = Summary::conditional(&all, &subset);

        assert_approx(summary.mean, 55.0);
        assert_approx(summary.median, 55.0);
        assert_approx(summary.percentile_5, 5.0);
        assert_approx(summary.percentile_95, 95.0);
    }

    #[test]
    fn test_conditional_falls_back_when_subset_empty() {
        let all = [-10.0, -20.0, -30.0];
        assert_eq!(Summary::conditional(&all, &[]), Summary::of(&all));
    }

    proptest! {
        #[test]
        fn prop_summary_is_ordered(values in vec(-1.0e7f64..1.0e7, 1..200)) {
            let summary = Summary::of(&values);
            let lo = values.iter().cloned().fold(f64::INFINITY, f64::min);
            let hi = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

            prop_assert!(summary.percentile_5 <= summary.median + 1e-6);
            prop_assert!(summary.median <= summary.percentile_95 + 1e-6);
            prop_assert!(lo <= summary.percentile_5 + 1e-6);
            prop_assert!(summary.percentile_95 <= hi + 1e-6);
            prop_assert!(lo - 1e-6 <= summary.mean && summary.mean <= hi + 1e-6);
        }
    }
}
