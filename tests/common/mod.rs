#![allow(dead_code)]

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stocksense::domain::analysis::AnalysisConfig;
use stocksense::domain::backtest::BacktestConfig;
use stocksense::domain::error::StockSenseError;
use stocksense::domain::indicator::IndicatorParams;
pub use stocksense::domain::ohlcv::OhlcvBar;
use stocksense::domain::price_series::PriceSeries;
use stocksense::ports::data_port::DataPort;
use std::collections::HashMap;

pub struct MockDataPort {
    pub data: HashMap<String, Vec<OhlcvBar>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_bars(mut self, ticker: &str, bars: Vec<OhlcvBar>) -> Self {
        self.data.insert(ticker.to_string(), bars);
        self
    }

    pub fn with_error(mut self, ticker: &str, reason: &str) -> Self {
        self.errors.insert(ticker.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_bars(&self, ticker: &str) -> Result<Vec<OhlcvBar>, StockSenseError> {
        if let Some(reason) = self.errors.get(ticker) {
            return Err(StockSenseError::DataLoad {
                reason: reason.clone(),
            });
        }
        self.data
            .get(ticker)
            .cloned()
            .ok_or_else(|| StockSenseError::DataLoad {
                reason: format!("no data for {}", ticker),
            })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// One bar per calendar day starting at `start_date`.
pub fn bars_from_closes(start_date: &str, closes: &[f64]) -> Vec<OhlcvBar> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| OhlcvBar {
            date: start + chrono::Duration::days(i as i64),
            open: close,
            high: close * 1.01,
            low: close * 0.99,
            close,
            volume: 1000 + i as u64,
        })
        .collect()
}

/// Closes 100, 101, ..., 100 + count - 1.
pub fn rising_closes(count: usize) -> Vec<f64> {
    (0..count).map(|i| 100.0 + i as f64).collect()
}

/// Geometric random walk with seeded, reproducible daily returns.
pub fn random_walk_closes(seed: u64, count: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut price = 100.0;
    (0..count)
        .map(|_| {
            price *= 1.0 + rng.gen_range(-0.02..0.02);
            price
        })
        .collect()
}

pub fn make_series(ticker: &str, closes: &[f64]) -> PriceSeries {
    PriceSeries::new(ticker, bars_from_closes("2025-01-01", closes)).unwrap()
}

pub fn default_config(as_of: NaiveDate) -> AnalysisConfig {
    AnalysisConfig {
        indicators: IndicatorParams::default(),
        backtest: BacktestConfig::default(),
        as_of,
    }
}
