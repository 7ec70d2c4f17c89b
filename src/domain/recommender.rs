//! Best-strategy selection and the action recommendation.

use std::cmp::Ordering;
use std::fmt;

use super::backtest::BacktestRun;

pub const MAX_SIGNAL_STRENGTH: f64 = 10.0;
const STRONG_THRESHOLD: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StrongBuy,
    Buy,
    Hold,
    Sell,
    StrongSell,
}

impl Action {
    /// Map a clamped signal strength to an action.
    pub fn from_strength(strength: f64) -> Self {
        if strength > STRONG_THRESHOLD {
            Action::StrongBuy
        } else if strength > 0.0 {
            Action::Buy
        } else if strength >= -STRONG_THRESHOLD {
            Action::Hold
        } else if strength >= -MAX_SIGNAL_STRENGTH {
            Action::Sell
        } else {
            Action::StrongSell
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Action::StrongBuy => "STRONG BUY",
            Action::Buy => "BUY",
            Action::Hold => "HOLD",
            Action::Sell => "SELL",
            Action::StrongSell => "STRONG SELL",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Index into the backtest runs, in registration order.
    pub best_index: usize,
    pub strategy_name: String,
    /// Latest signal of the best strategy, clamped to [-10, 10].
    pub current_signal_strength: f64,
    pub action: Action,
}

impl Recommendation {
    /// Fraction of the gauge to fill, 0 at -10 and 1 at +10.
    pub fn gauge(&self) -> f64 {
        ((self.current_signal_strength + MAX_SIGNAL_STRENGTH) / (2.0 * MAX_SIGNAL_STRENGTH))
            .clamp(0.0, 1.0)
    }

    pub fn best<'a>(&self, runs: &'a [BacktestRun]) -> Option<&'a BacktestRun> {
        runs.get(self.best_index)
    }
}

/// Clamp a raw signal into the reportable range. NaN reads as neutral.
pub fn clamp_strength(raw: f64) -> f64 {
    if raw.is_nan() {
        tracing::debug!("signal strength is NaN, treating as 0");
        return 0.0;
    }
    let clamped = raw.clamp(-MAX_SIGNAL_STRENGTH, MAX_SIGNAL_STRENGTH);
    if clamped != raw {
        tracing::debug!(raw, clamped, "signal strength clamped");
    }
    clamped
}

/// Order runs so that the better one compares greater: higher score, then
/// higher Sharpe, then smaller drawdown.
fn rank(a: &BacktestRun, b: &BacktestRun) -> Ordering {
    let (a, b) = (&a.result, &b.result);
    a.score
        .total_cmp(&b.score)
        .then(a.sharpe.total_cmp(&b.sharpe))
        .then(b.max_drawdown_pct.total_cmp(&a.max_drawdown_pct))
}

/// Pick the best run. Full ties go to the earliest registered strategy.
pub fn recommend(runs: &[BacktestRun]) -> Option<Recommendation> {
    let mut best_index = 0;
    for (i, run) in runs.iter().enumerate().skip(1) {
        if rank(run, &runs[best_index]) == Ordering::Greater {
            best_index = i;
        }
    }
    let best = runs.get(best_index)?;

    let strength = clamp_strength(best.latest_signal().strength);
    let recommendation = Recommendation {
        best_index,
        strategy_name: best.result.name.clone(),
        current_signal_strength: strength,
        action: Action::from_strength(strength),
    };
    tracing::info!(
        strategy = %recommendation.strategy_name,
        action = %recommendation.action,
        strength,
        "recommendation"
    );
    Some(recommendation)
}
