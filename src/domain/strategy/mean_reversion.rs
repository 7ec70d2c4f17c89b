//! Mean reversion: fade moves outside the Bollinger Bands.
//!
//! raw = -5 * (C - middle) / (upper - middle)
//! The raw value is +5 on the lower band and -5 on the upper band. Long below
//! the lower band, short above the upper band, flat in between. A zero-width
//! band (constant prices) is flat with raw 0.

use crate::domain::indicator::bollinger::{BandStatus, calculate_bollinger};
use crate::domain::strategy::{Position, Signal, Strategy};

const BAND_EDGE: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct MeanReversion {
    period: usize,
    stddev_mult_x100: u32,
}

impl MeanReversion {
    pub fn new(period: usize, stddev_mult_x100: u32) -> Self {
        Self {
            period,
            stddev_mult_x100,
        }
    }
}

impl Strategy for MeanReversion {
    fn name(&self) -> &str {
        "Mean Reversion"
    }

    fn warmup(&self) -> usize {
        self.period
    }

    fn evaluate(&self, history: &[f64]) -> Option<Signal> {
        let close = *history.last()?;
        let bands = calculate_bollinger(history, self.period, self.stddev_mult_x100).ok()?;

        let half_width = bands.upper - bands.middle;
        if half_width <= 0.0 {
            return Some(Signal::flat());
        }

        let raw = -BAND_EDGE * (close - bands.middle) / half_width;
        let position = match bands.classify(close) {
            BandStatus::Oversold => Position::Long,
            BandStatus::Overbought => Position::Short,
            BandStatus::Neutral => Position::Flat,
        };

        Some(Signal {
            position,
            strength: raw,
        })
    }
}
