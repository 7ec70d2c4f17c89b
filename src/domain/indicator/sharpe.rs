//! Daily Sharpe ratio.
//!
//! SHARPE = mean(R - rf) / stddev(R), unannualized, with the sample standard
//! deviation. Undefined for fewer than two returns or zero variance.

use crate::domain::indicator_helpers::{DEGENERATE_STDDEV, mean, sample_stddev};

pub fn calculate_sharpe(returns: &[f64], risk_free_rate: f64) -> Option<f64> {
    let stddev = sample_stddev(returns)?;
    if stddev < DEGENERATE_STDDEV {
        tracing::debug!(count = returns.len(), "sharpe undefined for zero-variance returns");
        return None;
    }
    let excess = mean(returns)? - risk_free_rate;
    Some(excess / stddev)
}
