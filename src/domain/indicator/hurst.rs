//! Hurst exponent via rescaled-range (R/S) analysis.
//!
//! The input (normally daily returns) is split into non-overlapping chunks of
//! sizes 8, 16, 32, ... up to half its length. For each chunk:
//!   R = max(Y) - min(Y), Y = cumulative sum of mean-adjusted values
//!   S = population standard deviation of the chunk
//! H is the least-squares slope of ln(mean R/S) against ln(size).
//!
//! Zero-variance chunks are dropped, as are sizes left without a usable
//! chunk. Fewer than two usable sizes leaves H undefined.
//!
//! The slope is clamped to [0, 1]. Typical return series land strictly
//! inside; a slope beyond either end (short, strongly structured input)
//! reports exactly 0 or 1 rather than being discarded.

use std::fmt;

use crate::domain::indicator_helpers::{DEGENERATE_STDDEV, mean, population_stddev};

const MIN_CHUNK: usize = 8;

const PERSISTENT_ABOVE: f64 = 0.55;
const MEAN_REVERTING_BELOW: f64 = 0.45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HurstBehavior {
    Trending,
    MeanReverting,
    RandomWalk,
    Undetermined,
}

impl HurstBehavior {
    pub fn classify(hurst: Option<f64>) -> Self {
        match hurst {
            Some(h) if h > PERSISTENT_ABOVE => HurstBehavior::Trending,
            Some(h) if h < MEAN_REVERTING_BELOW => HurstBehavior::MeanReverting,
            Some(_) => HurstBehavior::RandomWalk,
            None => HurstBehavior::Undetermined,
        }
    }
}

impl fmt::Display for HurstBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            HurstBehavior::Trending => "Persistent/Trending",
            HurstBehavior::MeanReverting => "Mean-Reverting",
            HurstBehavior::RandomWalk => "Random Walk",
            HurstBehavior::Undetermined => "Undetermined",
        };
        f.write_str(label)
    }
}

pub fn calculate_hurst(values: &[f64]) -> Option<f64> {
    let mut points: Vec<(f64, f64)> = Vec::new();

    let mut size = MIN_CHUNK;
    while size <= values.len() / 2 {
        match mean_rescaled_range(values, size) {
            Some(rs) => points.push(((size as f64).ln(), rs.ln())),
            None => tracing::debug!(size, "no usable R/S chunk, size excluded"),
        }
        size *= 2;
    }

    if points.len() < 2 {
        return None;
    }

    bounded(regression_slope(&points)?)
}

fn bounded(slope: f64) -> Option<f64> {
    if !slope.is_finite() {
        return None;
    }
    if !(0.0..=1.0).contains(&slope) {
        tracing::debug!(slope, "hurst slope outside [0, 1], clamped");
    }
    Some(slope.clamp(0.0, 1.0))
}

fn mean_rescaled_range(values: &[f64], size: usize) -> Option<f64> {
    let ratios: Vec<f64> = values.chunks_exact(size).filter_map(rescaled_range).collect();
    mean(&ratios)
}

fn rescaled_range(chunk: &[f64]) -> Option<f64> {
    let m = mean(chunk)?;
    let s = population_stddev(chunk)?;
    if s < DEGENERATE_STDDEV {
        return None;
    }

    let mut cumulative = 0.0_f64;
    let mut lo = 0.0_f64;
    let mut hi = 0.0_f64;
    for v in chunk {
        cumulative += v - m;
        lo = lo.min(cumulative);
        hi = hi.max(cumulative);
    }

    let range = hi - lo;
    (range > 0.0).then(|| range / s)
}

fn regression_slope(points: &[(f64, f64)]) -> Option<f64> {
    let n = points.len() as f64;
    let mx = points.iter().map(|p| p.0).sum::<f64>() / n;
    let my = points.iter().map(|p| p.1).sum::<f64>() / n;

    let sxx: f64 = points.iter().map(|p| (p.0 - mx).powi(2)).sum();
    let sxy: f64 = points.iter().map(|p| (p.0 - mx) * (p.1 - my)).sum();

    (sxx > 0.0).then(|| sxy / sxx)
}
