//! Latency percentiles for evaluation runs.
//!
//! Percentiles use the nearest-rank-below rule: the `p`th percentile of `n`
//! sorted samples is the element at index `floor(p * n / 100)`, clamped to
//! the last element. No interpolation.

use serde::{Deserialize, Serialize};

/// Calculate a percentile from samples sorted ascending.
///
/// # Returns
///
/// * `Some(value)` - The percentile value
/// * `None` - If samples is empty or p is outside 0..=100
///
/// # Examples
///
/// ```
/// use revdict_eval::stats::percentiles::percentile;
///
/// let data = vec![10.0, 20.0, 30.0, 40.0, 100.0];
/// assert_eq!(percentile(&data, 50), Some(30.0));
/// assert_eq!(percentile(&data, 95), Some(100.0));
/// ```
pub fn percentile(sorted: &[f64], p: usize) -> Option<f64> {
    if sorted.is_empty() || p > 100 {
        return None;
    }
    let index = (sorted.len() * p / 100).min(sorted.len() - 1);
    Some(sorted[index])
}

/// Mean, median and 95th percentile of per-query search latency, in
/// milliseconds
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LatencySummary {
    pub mean: f64,
    pub median: f64,
    pub p95: f64,
    pub count: usize,
}

impl LatencySummary {
    /// Compute summary statistics from samples in any order.
    ///
    /// Empty input yields all zeros.
    ///
    /// # Examples
    ///
    /// ```
    /// use revdict_eval::stats::LatencySummary;
    ///
    /// let summary = LatencySummary::from_samples(&[100.0, 10.0, 30.0, 20.0, 40.0]);
    /// assert_eq!(summary.mean, 40.0);
    /// assert_eq!(summary.median, 30.0);
    /// assert_eq!(summary.p95, 100.0);
    /// ```
    pub fn from_samples(samples: &[f64]) -> Self {
        if samples.is_empty() {
            return Self::default();
        }

        let mut sorted = samples.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = sorted.len();
        let mean = sorted.iter().sum::<f64>() / count as f64;

        Self {
            mean,
            median: sorted[count / 2],
            p95: percentile(&sorted, 95).unwrap_or_default(),
            count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_empty_samples() {
        assert_eq!(percentile(&[], 50), None);
    }

    #[test]
    fn test_percentile_invalid_p() {
        assert_eq!(percentile(&[1.0, 2.0], 101), None);
    }

    #[test]
    fn test_percentile_floor_index() {
        let samples: Vec<f64> = (1..=20).map(f64::from).collect();
        // 20 * 95 / 100 = 19
        assert_eq!(percentile(&samples, 95), Some(20.0));
        assert_eq!(percentile(&samples, 0), Some(1.0));
        assert_eq!(percentile(&samples, 100), Some(20.0));

        let samples: Vec<f64> = (1..=10).map(f64::from).collect();
        // 10 * 95 / 100 = 9
        assert_eq!(percentile(&samples, 95), Some(10.0));
        assert_eq!(percentile(&samples, 50), Some(6.0));
    }

    #[test]
    fn test_summary_known_values() {
        let summary = LatencySummary::from_samples(&[10.0, 20.0, 30.0, 40.0, 100.0]);
        assert_eq!(summary.count, 5);
        assert_eq!(summary.mean, 40.0);
        assert_eq!(summary.median, 30.0);
        assert_eq!(summary.p95, 100.0);
    }

    #[test]
    fn test_summary_empty_is_zero() {
        assert_eq!(LatencySummary::from_samples(&[]), LatencySummary::default());
    }

    #[test]
    fn test_summary_single_sample() {
        let summary = LatencySummary::from_samples(&[7.5]);
        assert_eq!(summary.mean, 7.5);
        assert_eq!(summary.median, 7.5);
        assert_eq!(summary.p95, 7.5);
    }

    #[test]
    fn test_summary_even_count_takes_upper_median() {
        let summary = LatencySummary::from_samples(&[4.0, 1.0, 3.0, 2.0]);
        assert_eq!(summary.median, 3.0);
    }
}
