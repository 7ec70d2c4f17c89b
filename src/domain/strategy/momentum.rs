//! Momentum: follow the price's distance from its moving average.
//!
//! raw = (C - SMA(n)) / SMA(n) * 100
//! Long above the average, short below it.

use crate::domain::indicator::sma::calculate_sma;
use crate::domain::strategy::{Position, Signal, Strategy};

#[derive(Debug, Clone)]
pub struct Momentum {
    period: usize,
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        Self { period }
    }
}

impl Strategy for Momentum {
    fn name(&self) -> &str {
        "Momentum"
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn evaluate(&self, history: &[f64]) -> Option<Signal> {
        let close = *history.last()?;
        let sma = calculate_sma(history, self.period).ok()?;
        let raw = (close - sma) / sma * 100.0;

        let position = if raw > 0.0 {
            Position::Long
        } else if raw < 0.0 {
            Position::Short
        } else {
            Position::Flat
        };

        Some(Signal {
            position,
            strength: raw,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warming_up_has_no_signal() {
        let strategy = Momentum::new(5);
        assert!(strategy.evaluate(&[1.0, 2.0, 3.0, 4.0]).is_none());
    }

    #[test]
    fn rising_prices_go_long() {
        let strategy = Momentum::new(3);
        let signal = strategy.evaluate(&[10.0, 11.0, 12.0]).unwrap();
        // (12 - 11) / 11 * 100
        assert_eq!(signal.position, Position::Long);
        assert!((signal.strength - 100.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn falling_prices_go_short() {
        let strategy = Momentum::new(3);
        let signal = strategy.evaluate(&[12.0, 11.0, 10.0]).unwrap();
        assert_eq!(signal.position, Position::Short);
        assert!(signal.strength < 0.0);
    }

    #[test]
    fn flat_prices_stay_flat() {
        let strategy = Momentum::new(3);
        let signal = strategy.evaluate(&[10.0, 10.0, 10.0]).unwrap();
        assert_eq!(signal.position, Position::Flat);
    }
}
