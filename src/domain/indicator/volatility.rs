//! Rolling volatility.
//!
//! Sample standard deviation (divides by n - 1) of the last n daily returns,
//! expressed as a fraction rather than a percentage.

use crate::domain::error::StockSenseError;
use crate::domain::indicator_helpers::sample_stddev;

pub fn calculate_volatility(returns: &[f64], period: usize) -> Result<f64, StockSenseError> {
    if period < 2 || returns.len() < period {
        return Err(StockSenseError::WindowTooLarge {
            window: period,
            available: returns.len(),
        });
    }
    let window = &returns[returns.len() - period..];
    // At least two values, so the sample deviation always exists.
    Ok(sample_stddev(window).unwrap_or(0.0))
}
