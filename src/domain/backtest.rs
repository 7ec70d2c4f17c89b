//! Strategy backtest engine.
//!
//! Each strategy is replayed bar by bar over the evaluation window. The
//! position decided at the close of bar i earns the return from bar i to
//! bar i + 1; the final bar's signal is only used for the recommendation.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use super::metrics::{ScoreWeights, StrategyResult};
use super::price_series::PriceSeries;
use super::strategy::{Position, Signal, Strategy};

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestConfig {
    /// Bars skipped before the first evaluated decision.
    pub warmup: usize,
    /// Decisions evaluated at the end of the series; 0 means all of them.
    pub lookback: usize,
    pub risk_free_rate: f64,
    pub weights: ScoreWeights,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        BacktestConfig {
            warmup: 20,
            lookback: 0,
            risk_free_rate: 0.0,
            weights: ScoreWeights::default(),
        }
    }
}

/// Everything one strategy produced over the series.
#[derive(Debug, Clone)]
pub struct BacktestRun {
    pub result: StrategyResult,
    /// One signal per bar of the series.
    pub signals: Vec<Signal>,
    /// Strategy return per evaluated bar.
    pub returns: Vec<f64>,
}

impl BacktestRun {
    /// Signal at the most recent bar.
    pub fn latest_signal(&self) -> Signal {
        self.signals.last().copied().unwrap_or_else(Signal::flat)
    }
}

/// Index of the first bar whose decision is scored.
///
/// A strategy that needs more history than `config.warmup` starts at its own
/// warmup, so no undefined early signal is ever scored.
pub fn evaluation_start(len: usize, strategy_warmup: usize, config: &BacktestConfig) -> usize {
    let last_decision = len.saturating_sub(1);
    let window_start = if config.lookback == 0 {
        0
    } else {
        last_decision.saturating_sub(config.lookback)
    };
    config
        .warmup
        .max(strategy_warmup)
        .max(window_start)
        .min(last_decision)
}

pub fn run_backtest(
    strategy: &dyn Strategy,
    series: &PriceSeries,
    config: &BacktestConfig,
) -> BacktestRun {
    let closes = series.closes();
    let signals = strategy.signals(series);
    if strategy.warmup() > config.warmup {
        tracing::debug!(
            strategy = strategy.name(),
            warmup = strategy.warmup(),
            configured = config.warmup,
            "strategy warmup exceeds configured warmup"
        );
    }
    let start = evaluation_start(closes.len(), strategy.warmup(), config);

    let mut returns = Vec::with_capacity(closes.len().saturating_sub(start));
    let mut positions: Vec<Position> = Vec::with_capacity(returns.capacity());
    for i in start..closes.len().saturating_sub(1) {
        let position = signals[i].position;
        let bar_return = closes[i + 1] / closes[i] - 1.0;
        returns.push(position.weight() * bar_return);
        positions.push(position);
    }

    let result = StrategyResult::compute(
        strategy.name(),
        &returns,
        &positions,
        config.risk_free_rate,
        &config.weights,
    );
    tracing::debug!(
        strategy = strategy.name(),
        bars = returns.len(),
        score = result.score,
        "backtest complete"
    );

    BacktestRun {
        result,
        signals,
        returns,
    }
}

/// Backtest every strategy. Output order matches `strategies`.
pub fn run_all(
    strategies: &[Box<dyn Strategy>],
    series: &PriceSeries,
    config: &BacktestConfig,
) -> Vec<BacktestRun> {
    #[cfg(feature = "parallel")]
    {
        strategies
            .par_iter()
            .map(|s| run_backtest(s.as_ref(), series, config))
            .collect()
    }
    #[cfg(not(feature = "parallel"))]
    {
        strategies
            .iter()
            .map(|s| run_backtest(s.as_ref(), series, config))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ohlcv::OhlcvBar;
    use crate::domain::strategy::BuyAndHold;
    use approx::assert_relative_eq;
    use chrono::{Duration, NaiveDate};

    fn series_from(closes: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let bars = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| OhlcvBar {
                date: start + Duration::days(i as i64),
                open: c,
                high: c,
                low: c,
                close: c,
                volume: 1000,
            })
            .collect();
        PriceSeries::new("TEST", bars).unwrap()
    }

    /// Short whenever the last close is above the first.
    struct Contrarian;

    impl Strategy for Contrarian {
        fn name(&self) -> &str {
            "Contrarian"
        }
        fn warmup(&self) -> usize {
            1
        }
        fn evaluate(&self, history: &[f64]) -> Option<Signal> {
            let first = history.first()?;
            let last = history.last()?;
            Some(Signal {
                position: if last > first {
                    Position::Short
                } else {
                    Position::Long
                },
                strength: -1.0,
            })
        }
    }

    /// Always long, but only once `period` closes are available.
    struct SlowStarter {
        period: usize,
    }

    impl Strategy for SlowStarter {
        fn name(&self) -> &str {
            "Slow Starter"
        }
        fn warmup(&self) -> usize {
            self.period
        }
        fn evaluate(&self, history: &[f64]) -> Option<Signal> {
            (history.len() > self.period).then_some(Signal {
                position: Position::Long,
                strength: 1.0,
            })
        }
    }

    #[test]
    fn evaluation_start_defaults_to_warmup() {
        let config = BacktestConfig::default();
        assert_eq!(evaluation_start(30, 1, &config), 20);
    }

    #[test]
    fn evaluation_start_with_lookback() {
        let config = BacktestConfig {
            lookback: 5,
            ..BacktestConfig::default()
        };
        assert_eq!(evaluation_start(100, 20, &config), 94);
        // lookback longer than the history falls back to warmup
        assert_eq!(evaluation_start(22, 20, &config), 20);
    }

    #[test]
    fn evaluation_start_never_passes_last_bar() {
        let config = BacktestConfig {
            warmup: 50,
            ..BacktestConfig::default()
        };
        assert_eq!(evaluation_start(30, 20, &config), 29);
        assert_eq!(evaluation_start(30, 80, &BacktestConfig::default()), 29);
    }

    #[test]
    fn evaluation_start_honours_strategy_warmup() {
        let config = BacktestConfig::default();
        assert_eq!(evaluation_start(60, 35, &config), 35);
        assert_eq!(evaluation_start(60, 5, &config), 20);
    }

    #[test]
    fn buy_and_hold_tracks_the_price() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let run = run_backtest(&BuyAndHold, &series_from(&closes), &BacktestConfig::default());
        assert_eq!(run.returns.len(), 9);
        assert_eq!(run.signals.len(), 30);
        // 120 -> 129
        assert_relative_eq!(run.result.total_return_pct, 7.5, epsilon = 1e-9);
        assert_relative_eq!(run.result.win_rate_pct, 100.0, epsilon = 1e-9);
        assert_eq!(run.result.max_drawdown_pct, 0.0);
    }

    #[test]
    fn contrarian_loses_on_steady_trends() {
        let closes: Vec<f64> = (0..30).map(|i| 130.0 - i as f64).collect();
        let run = run_backtest(&Contrarian, &series_from(&closes), &BacktestConfig::default());
        // price falls, last <= first so Contrarian stays long
        assert!(run.result.total_return_pct < 0.0);

        let rising: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let run = run_backtest(&Contrarian, &series_from(&rising), &BacktestConfig::default());
        assert!(run.result.total_return_pct < 0.0);
        assert_eq!(run.result.win_rate_pct, 0.0);
    }

    #[test]
    fn run_all_keeps_registration_order() {
        let strategies: Vec<Box<dyn Strategy>> = vec![Box::new(Contrarian), Box::new(BuyAndHold)];
        let closes: Vec<f64> = (0..25).map(|i| 50.0 + (i % 3) as f64).collect();
        let runs = run_all(&strategies, &series_from(&closes), &BacktestConfig::default());
        let names: Vec<&str> = runs.iter().map(|r| r.result.name.as_str()).collect();
        assert_eq!(names, vec!["Contrarian", "Buy & Hold"]);
    }

    #[test]
    fn latest_signal_is_last_bar() {
        let closes: Vec<f64> = (0..25).map(|i| 100.0 + i as f64).collect();
        let run = run_backtest(&Contrarian, &series_from(&closes), &BacktestConfig::default());
        assert_eq!(run.latest_signal().position, Position::Short);
    }

    #[test]
    fn long_strategy_warmup_is_not_scored_as_flat() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + i as f64).collect();
        let run = run_backtest(
            &SlowStarter { period: 30 },
            &series_from(&closes),
            &BacktestConfig::default(),
        );
        // decisions at bars 30..=38, all long
        assert_eq!(run.returns.len(), 9);
        assert!(run.returns.iter().all(|r| *r > 0.0));
        assert_relative_eq!(run.result.win_rate_pct, 100.0, epsilon = 1e-9);
        // 130 -> 139
        assert_relative_eq!(run.result.total_return_pct, 900.0 / 130.0, epsilon = 1e-9);
    }
}
