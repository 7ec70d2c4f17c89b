//! End-to-end analysis of one ticker: indicators, backtests, recommendation.

use chrono::{Datelike, NaiveDate};

use super::backtest::{self, BacktestConfig};
use super::error::StockSenseError;
use super::indicator::autocorrelation::{REPORTED_LAGS, SerialPattern};
use super::indicator::bollinger::{BandStatus, Bands};
use super::indicator::hurst::HurstBehavior;
use super::indicator::sma::Trend;
use super::indicator::{IndicatorParams, IndicatorSet, IndicatorType, compute_indicators};
use super::indicator_helpers::ReturnStats;
use super::metrics::StrategyResult;
use super::price_series::PriceSeries;
use super::recommender::{self, Recommendation};
use super::strategy::Strategy;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub indicators: IndicatorParams,
    pub backtest: BacktestConfig,
    /// Date the run is "as of"; its year drives year-to-date performance.
    pub as_of: NaiveDate,
}

/// Every value the report prints. `None` marks a degenerate computation.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub code: String,
    pub latest_date: NaiveDate,
    pub latest_close: f64,
    pub sma: Option<f64>,
    pub volatility: Option<f64>,
    pub mean_return: Option<f64>,
    /// Daily return summary: mean, stddev, best and worst day.
    pub return_stats: Option<ReturnStats>,
    pub sharpe: Option<f64>,
    pub ytd_pct: Option<f64>,
    /// Positive magnitude, in percent.
    pub max_drawdown_pct: Option<f64>,
    pub bands: Option<Bands>,
    pub hurst: Option<f64>,
    /// (lag, value) in reporting order.
    pub autocorrelation: Vec<(usize, Option<f64>)>,
    pub strategies: Vec<StrategyResult>,
    pub recommendation: Recommendation,
}

impl AnalysisReport {
    pub fn band_status(&self) -> Option<BandStatus> {
        self.bands.map(|b| b.classify(self.latest_close))
    }

    pub fn hurst_behavior(&self) -> HurstBehavior {
        HurstBehavior::classify(self.hurst)
    }

    pub fn trend(&self) -> Option<Trend> {
        self.sma.map(|sma| Trend::classify(self.latest_close, sma))
    }

    /// (lag, reading) for each reported autocorrelation.
    pub fn serial_patterns(&self) -> Vec<(usize, Option<SerialPattern>)> {
        self.autocorrelation
            .iter()
            .map(|(lag, value)| (*lag, value.map(SerialPattern::classify)))
            .collect()
    }

    pub fn best_strategy(&self) -> Option<&StrategyResult> {
        self.strategies.get(self.recommendation.best_index)
    }
}

pub fn analyze(
    series: &PriceSeries,
    strategies: &[Box<dyn Strategy>],
    config: &AnalysisConfig,
) -> Result<AnalysisReport, StockSenseError> {
    tracing::info!(code = series.code(), bars = series.len(), "analysis started");

    let params = &config.indicators;
    let set = compute_indicators(series, params, config.as_of.year())?;
    tracing::info!(count = set.len(), "indicators ready");

    let runs = backtest::run_all(strategies, series, &config.backtest);
    tracing::info!(strategies = runs.len(), "backtests ready");

    let recommendation =
        recommender::recommend(&runs).ok_or_else(|| StockSenseError::InvalidInput {
            reason: "no strategies registered".to_string(),
        })?;

    let latest = series.latest();
    Ok(AnalysisReport {
        code: series.code().to_string(),
        latest_date: latest.date,
        latest_close: latest.close,
        sma: set.simple(&IndicatorType::Sma(params.window)),
        volatility: set.simple(&IndicatorType::Volatility(params.window)),
        mean_return: set.simple(&IndicatorType::MeanReturn),
        return_stats: ReturnStats::compute(&series.returns()),
        sharpe: set.simple(&IndicatorType::Sharpe),
        ytd_pct: set.simple(&IndicatorType::YtdPerformance),
        max_drawdown_pct: set
            .simple(&IndicatorType::MaxDrawdown)
            .map(|dd| dd.abs() * 100.0),
        bands: bands_of(&set, params),
        hurst: set.simple(&IndicatorType::Hurst),
        autocorrelation: REPORTED_LAGS
            .iter()
            .map(|&lag| (lag, set.simple(&IndicatorType::Autocorrelation(lag))))
            .collect(),
        strategies: runs.into_iter().map(|r| r.result).collect(),
        recommendation,
    })
}

fn bands_of(set: &IndicatorSet, params: &IndicatorParams) -> Option<Bands> {
    set.bands(&params.bollinger_type())
        .map(|(lower, middle, upper)| Bands {
            upper,
            middle,
            lower,
        })
}
