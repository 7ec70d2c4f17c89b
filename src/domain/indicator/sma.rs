//! Simple Moving Average.
//!
//! SMA(n) = sum(C[last-j] for j in 0..n) / n

use std::fmt;

use crate::domain::error::StockSenseError;

/// Latest close relative to its moving average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Up,
    /// At or below the average.
    DownOrFlat,
}

impl Trend {
    pub fn classify(close: f64, sma: f64) -> Self {
        if close > sma {
            Trend::Up
        } else {
            Trend::DownOrFlat
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => f.write_str("UP"),
            Trend::DownOrFlat => f.write_str("DOWN/FLAT"),
        }
    }
}

pub fn calculate_sma(closes: &[f64], period: usize) -> Result<f64, StockSenseError> {
    if period == 0 || closes.len() < period {
        return Err(StockSenseError::WindowTooLarge {
            window: period,
            available: closes.len(),
        });
    }
    let window = &closes[closes.len() - period..];
    Ok(window.iter().sum::<f64>() / period as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sma_uses_last_window() {
        let closes = [100.0, 110.0, 120.0, 130.0, 140.0];
        assert!((calculate_sma(&closes, 3).unwrap() - 130.0).abs() < 1e-12);
    }

    #[test]
    fn trend_against_average() {
        assert_eq!(Trend::classify(101.0, 100.0), Trend::Up);
        assert_eq!(Trend::classify(100.0, 100.0), Trend::DownOrFlat);
        assert_eq!(Trend::classify(99.0, 100.0), Trend::DownOrFlat);
        assert_eq!(Trend::DownOrFlat.to_string(), "DOWN/FLAT");
    }

    #[test]
    fn sma_full_window() {
        let closes = [10.0, 20.0, 30.0];
        assert!((calculate_sma(&closes, 3).unwrap() - 20.0).abs() < 1e-12);
    }

    #[test]
    fn sma_window_too_large() {
        let err = calculate_sma(&[1.0, 2.0], 3).unwrap_err();
        assert!(matches!(
            err,
            StockSenseError::WindowTooLarge { window: 3, available: 2 }
        ));
    }

    #[test]
    fn sma_zero_period() {
        assert!(calculate_sma(&[1.0, 2.0], 0).is_err());
    }

    proptest! {
        #[test]
        fn sma_within_window_bounds(
            closes in prop::collection::vec(0.01f64..10_000.0, 20..60),
            period in 1usize..20,
        ) {
            let sma = calculate_sma(&closes, period).unwrap();
            let window = &closes[closes.len() - period..];
            let lo = window.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = window.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(sma >= lo - 1e-9 && sma <= hi + 1e-9);
        }
    }
}
