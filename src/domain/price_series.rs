//! Validated, chronologically ordered price history for one ticker.

use crate::domain::error::StockSenseError;
use crate::domain::ohlcv::OhlcvBar;

/// Smallest series the 20-day indicators can work with.
pub const MIN_BARS: usize = 21;

#[derive(Debug, Clone)]
pub struct PriceSeries {
    code: String,
    bars: Vec<OhlcvBar>,
}

impl PriceSeries {
    /// Build a series, rejecting unordered dates, non-positive prices and
    /// histories shorter than [`MIN_BARS`].
    pub fn new(code: impl Into<String>, bars: Vec<OhlcvBar>) -> Result<Self, StockSenseError> {
        let code = code.into();

        if let Some(bar) = bars.iter().find(|b| !b.has_positive_prices()) {
            return Err(StockSenseError::InvalidInput {
                reason: format!("non-positive price on {}", bar.date),
            });
        }

        if let Some(w) = bars.windows(2).find(|w| w[1].date <= w[0].date) {
            return Err(StockSenseError::InvalidInput {
                reason: format!("dates not strictly increasing at {} -> {}", w[0].date, w[1].date),
            });
        }

        if bars.len() < MIN_BARS {
            return Err(StockSenseError::InsufficientData {
                code,
                bars: bars.len(),
                minimum: MIN_BARS,
            });
        }

        Ok(Self { code, bars })
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn latest(&self) -> &OhlcvBar {
        // Non-empty by construction.
        &self.bars[self.bars.len() - 1]
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Daily simple returns, one shorter than the series. Derived on every call.
    pub fn returns(&self) -> Vec<f64> {
        self.bars
            .windows(2)
            .map(|w| w[1].return_from(w[0].close))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn make_bars(prices: &[f64]) -> Vec<OhlcvBar> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        prices
            .iter()
            .enumerate()
            .map(|(i, &close)| OhlcvBar {
                date: start + chrono::Duration::days(i as i64),
                open: close,
                high: close,
                low: close,
                close,
                volume: 1000,
            })
            .collect()
    }

    fn rising(count: usize) -> Vec<f64> {
        (0..count).map(|i| 100.0 + i as f64).collect()
    }

    #[test]
    fn accepts_minimum_length() {
        let series = PriceSeries::new("TEST", make_bars(&rising(MIN_BARS))).unwrap();
        assert_eq!(series.len(), MIN_BARS);
        assert_eq!(series.code(), "TEST");
    }

    #[test]
    fn rejects_short_series() {
        let err = PriceSeries::new("TEST", make_bars(&rising(20))).unwrap_err();
        assert!(matches!(
            err,
            StockSenseError::InsufficientData { bars: 20, minimum: 21, .. }
        ));
    }

    #[test]
    fn rejects_non_positive_close() {
        let mut prices = rising(25);
        prices[7] = 0.0;
        let err = PriceSeries::new("TEST", make_bars(&prices)).unwrap_err();
        assert!(matches!(err, StockSenseError::InvalidInput { .. }));
    }

    #[test]
    fn rejects_duplicate_dates() {
        let mut bars = make_bars(&rising(25));
        bars[5].date = bars[4].date;
        let err = PriceSeries::new("TEST", bars).unwrap_err();
        assert!(matches!(err, StockSenseError::InvalidInput { .. }));
    }

    #[test]
    fn tolerates_gaps() {
        let mut bars = make_bars(&rising(25));
        for bar in bars.iter_mut().skip(10) {
            bar.date = bar.date + chrono::Duration::days(3);
        }
        assert!(PriceSeries::new("TEST", bars).is_ok());
    }

    #[test]
    fn returns_are_one_shorter() {
        let series = PriceSeries::new("TEST", make_bars(&rising(30))).unwrap();
        let returns = series.returns();
        assert_eq!(returns.len(), 29);
        assert!((returns[0] - 0.01).abs() < 1e-12);
    }

    #[test]
    fn latest_is_last_bar() {
        let series = PriceSeries::new("TEST", make_bars(&rising(30))).unwrap();
        assert_eq!(series.latest().close, 129.0);
    }
}
