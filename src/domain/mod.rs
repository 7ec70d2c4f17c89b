//! Core domain types and logic.

pub mod analysis;
pub mod backtest;
pub mod config_validation;
pub mod error;
pub mod indicator;
pub mod indicator_helpers;
pub mod metrics;
pub mod ohlcv;
pub mod price_series;
pub mod recommender;
pub mod strategy;
