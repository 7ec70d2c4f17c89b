//! Pluggable trading strategies.
//!
//! A strategy turns the close history up to and including a bar into a
//! [`Signal`] for that bar. The engine only ever hands a strategy the prefix
//! `closes[..=i]`, so bar i's decision cannot see bar i + 1.

pub mod buy_and_hold;
pub mod mean_reversion;
pub mod momentum;

use crate::domain::indicator::IndicatorParams;
use crate::domain::price_series::PriceSeries;

pub use buy_and_hold::BuyAndHold;
pub use mean_reversion::MeanReversion;
pub use momentum::Momentum;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Long,
    Flat,
    Short,
}

impl Position {
    /// Exposure applied to the next bar's return.
    pub fn weight(self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Flat => 0.0,
            Position::Short => -1.0,
        }
    }
}

/// Position plus the raw signal value that produced it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Signal {
    pub position: Position,
    pub strength: f64,
}

impl Signal {
    pub fn flat() -> Self {
        Signal {
            position: Position::Flat,
            strength: 0.0,
        }
    }
}

pub trait Strategy: Send + Sync {
    /// Display name without the trailing "Strategy".
    fn name(&self) -> &str;

    /// Bars of history needed before `evaluate` returns a signal.
    fn warmup(&self) -> usize;

    /// Signal for the last bar of `history`, `None` while warming up.
    fn evaluate(&self, history: &[f64]) -> Option<Signal>;

    /// One signal per bar; warmup bars are flat.
    fn signals(&self, series: &PriceSeries) -> Vec<Signal> {
        let closes = series.closes();
        (0..closes.len())
            .map(|i| self.evaluate(&closes[..=i]).unwrap_or_else(Signal::flat))
            .collect()
    }
}

/// The registered strategies, in the order they are evaluated and reported.
pub fn default_strategies(params: &IndicatorParams) -> Vec<Box<dyn Strategy>> {
    vec![
        Box::new(Momentum::new(params.window)),
        Box::new(MeanReversion::new(params.window, params.stddev_mult_x100)),
        Box::new(BuyAndHold),
    ]
}
