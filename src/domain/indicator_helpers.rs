//! Shared statistics used by the indicator calculations.

/// Standard deviations below this are treated as zero variance.
pub const DEGENERATE_STDDEV: f64 = 1e-12;

/// Arithmetic mean, `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n - 1 denominator). Needs at least two values.
pub fn sample_stddev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(variance.max(0.0).sqrt())
}

/// Population standard deviation (n denominator).
pub fn population_stddev(values: &[f64]) -> Option<f64> {
    let m = mean(values)?;
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / values.len() as f64;
    Some(variance.max(0.0).sqrt())
}

/// Summary statistics of a daily return series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReturnStats {
    pub mean: f64,
    pub stddev: f64,
    pub min: f64,
    pub max: f64,
}

impl ReturnStats {
    /// `stddev` is the sample standard deviation; a single return yields 0.
    pub fn compute(returns: &[f64]) -> Option<Self> {
        let mean = mean(returns)?;
        let stddev = sample_stddev(returns).unwrap_or(0.0);
        let min = returns.iter().copied().fold(f64::INFINITY, f64::min);
        let max = returns.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        Some(Self {
            mean,
            stddev,
            min,
            max,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(mean(&[]), None);
    }

    #[test]
    fn sample_stddev_known_values() {
        // mean 5, squared deviations sum to 32, 32 / 7
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let expected = (32.0_f64 / 7.0).sqrt();
        assert!((sample_stddev(&v).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn population_stddev_known_values() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((population_stddev(&v).unwrap() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn sample_stddev_needs_two_values() {
        assert_eq!(sample_stddev(&[1.0]), None);
    }

    #[test]
    fn return_stats_summary() {
        let stats = ReturnStats::compute(&[0.01, -0.02, 0.03]).unwrap();
        assert!((stats.mean - 0.02 / 3.0).abs() < 1e-12);
        assert_eq!(stats.min, -0.02);
        assert_eq!(stats.max, 0.03);
        assert!(stats.stddev > 0.0);
    }

    #[test]
    fn return_stats_empty() {
        assert!(ReturnStats::compute(&[]).is_none());
    }
}
