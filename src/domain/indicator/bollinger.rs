//! Bollinger Bands indicator.
//!
//! Bollinger Bands consist of:
//! - Middle: Simple Moving Average (SMA) over n periods
//! - Upper: Middle + (multiplier × StdDev)
//! - Lower: Middle - (multiplier × StdDev)
//!
//! Where StdDev is the population standard deviation of the closing prices
//! in the window (divides by N, not N-1).
//!
//! Default parameters: period=20, multiplier=2.0

use std::fmt;

use crate::domain::error::StockSenseError;
use crate::domain::indicator::sma::calculate_sma;
use crate::domain::indicator_helpers::population_stddev;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Where a price sits relative to the bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandStatus {
    Overbought,
    Oversold,
    Neutral,
}

impl Bands {
    pub fn classify(&self, price: f64) -> BandStatus {
        if price > self.upper {
            BandStatus::Overbought
        } else if price < self.lower {
            BandStatus::Oversold
        } else {
            BandStatus::Neutral
        }
    }
}

impl fmt::Display for BandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BandStatus::Overbought => "Overbought",
            BandStatus::Oversold => "Oversold",
            BandStatus::Neutral => "Neutral",
        };
        f.write_str(label)
    }
}

pub fn calculate_bollinger(
    closes: &[f64],
    period: usize,
    stddev_mult_x100: u32,
) -> Result<Bands, StockSenseError> {
    let middle = calculate_sma(closes, period)?;
    let window = &closes[closes.len() - period..];
    let stddev = population_stddev(window).unwrap_or(0.0);
    let mult = stddev_mult_x100 as f64 / 100.0;

    Ok(Bands {
        upper: middle + mult * stddev,
        middle,
        lower: middle - mult * stddev,
    })
}
