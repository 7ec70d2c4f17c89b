//! Technical indicator implementations.
//!
//! Every indicator is a pure function over a close or return slice that
//! yields the value as of the last element. The types here name indicators
//! and hold their latest values:
//! - `IndicatorType`: indicator identity + parameters (serves as HashMap key)
//! - `IndicatorValue`: enum for the different output shapes
//! - `IndicatorSet`: latest value per indicator for one run

pub mod autocorrelation;
pub mod bollinger;
pub mod hurst;
pub mod performance;
pub mod sharpe;
pub mod sma;
pub mod volatility;

use std::collections::HashMap;
use std::fmt;

use crate::domain::error::StockSenseError;
use crate::domain::indicator_helpers::ReturnStats;
use crate::domain::price_series::PriceSeries;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Bollinger { upper: f64, middle: f64, lower: f64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorType {
    Sma(usize),
    Volatility(usize),
    Bollinger { period: usize, stddev_mult_x100: u32 },
    MeanReturn,
    Sharpe,
    YtdPerformance,
    MaxDrawdown,
    Hurst,
    Autocorrelation(usize),
}

impl fmt::Display for IndicatorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorType::Sma(period) => write!(f, "SMA({})", period),
            IndicatorType::Volatility(period) => write!(f, "VOLATILITY({})", period),
            IndicatorType::Bollinger {
                period,
                stddev_mult_x100,
            } => {
                let mult = *stddev_mult_x100 as f64 / 100.0;
                write!(f, "BOLLINGER({},{})", period, mult)
            }
            IndicatorType::MeanReturn => write!(f, "MEAN_RETURN"),
            IndicatorType::Sharpe => write!(f, "SHARPE"),
            IndicatorType::YtdPerformance => write!(f, "YTD"),
            IndicatorType::MaxDrawdown => write!(f, "MAX_DRAWDOWN"),
            IndicatorType::Hurst => write!(f, "HURST"),
            IndicatorType::Autocorrelation(lag) => write!(f, "ACF({})", lag),
        }
    }
}

/// Latest indicator values for a single run.
///
/// A degenerate computation leaves its indicator out of the set; readers
/// treat a missing entry as "not available".
#[derive(Debug, Clone, Default)]
pub struct IndicatorSet {
    values: HashMap<IndicatorType, IndicatorValue>,
}

impl IndicatorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, indicator: IndicatorType, value: IndicatorValue) {
        self.values.insert(indicator, value);
    }

    /// Insert a scalar when present, otherwise record nothing.
    pub fn insert_simple(&mut self, indicator: IndicatorType, value: Option<f64>) {
        match value {
            Some(v) if v.is_finite() => {
                self.values.insert(indicator, IndicatorValue::Simple(v));
            }
            _ => tracing::debug!(%indicator, "indicator unavailable"),
        }
    }

    pub fn get(&self, indicator: &IndicatorType) -> Option<&IndicatorValue> {
        self.values.get(indicator)
    }

    pub fn simple(&self, indicator: &IndicatorType) -> Option<f64> {
        match self.values.get(indicator) {
            Some(IndicatorValue::Simple(v)) => Some(*v),
            _ => None,
        }
    }

    /// (lower, middle, upper) for a Bollinger entry.
    pub fn bands(&self, indicator: &IndicatorType) -> Option<(f64, f64, f64)> {
        match self.values.get(indicator) {
            Some(IndicatorValue::Bollinger {
                upper,
                middle,
                lower,
            }) => Some((*lower, *middle, *upper)),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Parameters shared by the windowed indicators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatorParams {
    pub window: usize,
    pub stddev_mult_x100: u32,
    pub risk_free_rate: f64,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        IndicatorParams {
            window: 20,
            stddev_mult_x100: 200,
            risk_free_rate: 0.0,
        }
    }
}

impl IndicatorParams {
    pub fn bollinger_type(&self) -> IndicatorType {
        IndicatorType::Bollinger {
            period: self.window,
            stddev_mult_x100: self.stddev_mult_x100,
        }
    }
}

/// Compute every reported indicator as of the latest bar.
///
/// Window errors are fatal; degenerate statistics are left out of the set.
/// `year` selects the calendar year for year-to-date performance.
pub fn compute_indicators(
    series: &PriceSeries,
    params: &IndicatorParams,
    year: i32,
) -> Result<IndicatorSet, StockSenseError> {
    let closes = series.closes();
    let returns = series.returns();
    let mut set = IndicatorSet::new();

    let sma = sma::calculate_sma(&closes, params.window)?;
    set.insert(IndicatorType::Sma(params.window), IndicatorValue::Simple(sma));

    let vol = volatility::calculate_volatility(&returns, params.window)?;
    set.insert(
        IndicatorType::Volatility(params.window),
        IndicatorValue::Simple(vol),
    );

    let bands = bollinger::calculate_bollinger(&closes, params.window, params.stddev_mult_x100)?;
    set.insert(
        params.bollinger_type(),
        IndicatorValue::Bollinger {
            upper: bands.upper,
            middle: bands.middle,
            lower: bands.lower,
        },
    );

    set.insert_simple(
        IndicatorType::MeanReturn,
        ReturnStats::compute(&returns).map(|s| s.mean),
    );
    set.insert_simple(
        IndicatorType::Sharpe,
        sharpe::calculate_sharpe(&returns, params.risk_free_rate),
    );
    set.insert_simple(
        IndicatorType::YtdPerformance,
        performance::calculate_ytd(series.bars(), year),
    );
    set.insert_simple(
        IndicatorType::MaxDrawdown,
        Some(performance::calculate_max_drawdown(&closes)),
    );
    set.insert_simple(IndicatorType::Hurst, hurst::calculate_hurst(&returns));

    for lag in autocorrelation::REPORTED_LAGS {
        set.insert_simple(
            IndicatorType::Autocorrelation(lag),
            autocorrelation::calculate_autocorrelation(&returns, lag),
        );
    }

    tracing::debug!(count = set.len(), "indicators computed");
    Ok(set)
}
