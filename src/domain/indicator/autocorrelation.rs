//! Autocorrelation of a series with a lagged copy of itself.
//!
//! ACF(k) = pearson(x[t], x[t-k]) over every t where both exist.
//! Undefined with fewer than two pairs or a zero-variance side.

use std::fmt;

use crate::domain::indicator_helpers::{DEGENERATE_STDDEV, mean};

/// Lags reported for daily, weekly and monthly patterns.
pub const REPORTED_LAGS: [usize; 3] = [1, 5, 20];

const PATTERN_THRESHOLD: f64 = 0.1;

/// Reading of one autocorrelation value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialPattern {
    /// Moves tend to continue.
    Momentum,
    /// Moves tend to reverse.
    MeanReversion,
    Weak,
}

impl SerialPattern {
    pub fn classify(acf: f64) -> Self {
        if acf > PATTERN_THRESHOLD {
            SerialPattern::Momentum
        } else if acf < -PATTERN_THRESHOLD {
            SerialPattern::MeanReversion
        } else {
            SerialPattern::Weak
        }
    }
}

impl fmt::Display for SerialPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SerialPattern::Momentum => "Strong momentum",
            SerialPattern::MeanReversion => "Strong mean reversion",
            SerialPattern::Weak => "Weak/random",
        };
        f.write_str(label)
    }
}

pub fn calculate_autocorrelation(values: &[f64], lag: usize) -> Option<f64> {
    if lag == 0 || values.len() < lag + 2 {
        return None;
    }

    let current = &values[lag..];
    let lagged = &values[..values.len() - lag];

    let mc = mean(current)?;
    let ml = mean(lagged)?;

    let mut cov = 0.0_f64;
    let mut var_c = 0.0_f64;
    let mut var_l = 0.0_f64;
    for (c, l) in current.iter().zip(lagged) {
        let dc = c - mc;
        let dl = l - ml;
        cov += dc * dl;
        var_c += dc * dc;
        var_l += dl * dl;
    }

    let n = current.len() as f64;
    if (var_c / n).sqrt() < DEGENERATE_STDDEV || (var_l / n).sqrt() < DEGENERATE_STDDEV {
        tracing::debug!(lag, "autocorrelation undefined for zero-variance side");
        return None;
    }

    Some((cov / (var_c * var_l).sqrt()).clamp(-1.0, 1.0))
}
