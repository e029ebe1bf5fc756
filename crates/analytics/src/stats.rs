//! Descriptive statistics helpers
//!
//! Population (not sample) moments throughout, matching how the metrics
//! treat a run as the whole population of its trades.

use serde::{Deserialize, Serialize};

/// Arithmetic mean; zero for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Population standard deviation; zero for an empty slice
pub fn std_dev(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|x| (x - m).powi(2)).sum::<f64>() / values.len() as f64;
    variance.sqrt()
}

/// Median (average of the two middle values for even lengths); zero when empty
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

/// Consecutive differences `x[i+1] - x[i]`
pub fn diff(values: &[f64]) -> Vec<f64> {
    values.windows(2).map(|w| w[1] - w[0]).collect()
}

/// Standardized third and fourth moments `(skewness, excess kurtosis)`
///
/// `None` when the spread is zero.
pub fn skew_kurtosis(values: &[f64]) -> Option<(f64, f64)> {
    let m = mean(values);
    let sd = std_dev(values);
    if values.is_empty() || sd <= 0.0 {
        return None;
    }

    let n = values.len() as f64;
    let (mut m3, mut m4) = (0.0, 0.0);
    for x in values {
        let z = (x - m) / sd;
        m3 += z.powi(3);
        m4 += z.powi(4);
    }
    Some((m3 / n, m4 / n - 3.0))
}

/// Mean, spread and range of one metric across runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub median: f64,
}

impl SummaryStats {
    /// Summarize `values`; all fields zero when empty
    pub fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return Self::default();
        }
        Self {
            mean: mean(values),
            std: std_dev(values),
            min: values.iter().copied().fold(f64::INFINITY, f64::min),
            max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            median: median(values),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_and_std() {
        let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert_relative_eq!(mean(&values), 5.0);
        assert_relative_eq!(std_dev(&values), 2.0);
    }

    #[test]
    fn test_median_even_and_odd() {
        assert_relative_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_relative_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
    }

    #[test]
    fn test_empty_inputs_are_zero() {
        assert_eq!(mean(&[]), 0.0);
        assert_eq!(std_dev(&[]), 0.0);
        assert_eq!(median(&[]), 0.0);
        assert_eq!(SummaryStats::from_values(&[]), SummaryStats::default());
        assert!(skew_kurtosis(&[]).is_none());
    }

    #[test]
    fn test_symmetric_values_have_no_skew() {
        let (skew, kurt) = skew_kurtosis(&[1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
        assert_relative_eq!(skew, 0.0, epsilon = 1e-12);
        // Discrete uniform on 5 points: m4/sigma^4 = 6.8/4 = 1.7
        assert_relative_eq!(kurt, 1.7 - 3.0, epsilon = 1e-12);
    }

    #[test]
    fn test_constant_values_have_no_shape() {
        assert!(skew_kurtosis(&[3.0, 3.0, 3.0, 3.0]).is_none());
    }

    #[test]
    fn test_summary_stats() {
        let stats = SummaryStats::from_values(&[1.0, 5.0, 3.0]);
        assert_relative_eq!(stats.mean, 3.0);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn test_diff() {
        assert_eq!(diff(&[1.0, 4.0, 2.0]), vec![3.0, -2.0]);
        assert!(diff(&[1.0]).is_empty());
    }
}
