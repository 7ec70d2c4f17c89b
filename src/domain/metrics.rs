//! Strategy performance metrics and the composite ranking score.

use super::indicator::performance::calculate_max_drawdown;
use super::indicator::sharpe::calculate_sharpe;
use super::strategy::Position;

/// Weights of the composite score. Applied identically to every strategy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub return_weight: f64,
    pub sharpe_weight: f64,
    pub win_rate_weight: f64,
    pub drawdown_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoreWeights {
            return_weight: 0.4,
            sharpe_weight: 0.3,
            win_rate_weight: 0.2,
            drawdown_weight: 0.1,
        }
    }
}

impl ScoreWeights {
    /// Inputs are fractions; `max_drawdown` is the positive magnitude.
    pub fn score(&self, total_return: f64, sharpe: f64, win_rate: f64, max_drawdown: f64) -> f64 {
        self.return_weight * total_return + self.sharpe_weight * sharpe
            + self.win_rate_weight * win_rate
            - self.drawdown_weight * max_drawdown
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StrategyResult {
    pub name: String,
    pub total_return_pct: f64,
    pub sharpe: f64,
    pub max_drawdown_pct: f64,
    pub win_rate_pct: f64,
    pub score: f64,
}

impl StrategyResult {
    /// Aggregate per-bar strategy returns. `positions[i]` is the exposure that
    /// earned `returns[i]`; flat bars are excluded from the win rate.
    pub fn compute(
        name: &str,
        returns: &[f64],
        positions: &[Position],
        risk_free_rate: f64,
        weights: &ScoreWeights,
    ) -> Self {
        let equity = equity_curve(returns);
        let final_equity = equity.last().copied().unwrap_or(1.0);
        let total_return = final_equity - 1.0;

        let sharpe = calculate_sharpe(returns, risk_free_rate).unwrap_or(0.0);
        let max_drawdown = calculate_max_drawdown(&equity).abs();

        let mut trades = 0usize;
        let mut wins = 0usize;
        for (r, position) in returns.iter().zip(positions) {
            if *position != Position::Flat {
                trades += 1;
                if *r > 0.0 {
                    wins += 1;
                }
            }
        }
        let win_rate = if trades > 0 {
            wins as f64 / trades as f64
        } else {
            0.0
        };

        StrategyResult {
            name: name.to_string(),
            total_return_pct: total_return * 100.0,
            sharpe,
            max_drawdown_pct: max_drawdown * 100.0,
            win_rate_pct: win_rate * 100.0,
            score: weights.score(total_return, sharpe, win_rate, max_drawdown),
        }
    }
}

/// Compounded equity starting at 1.0, one point longer than `returns`.
pub fn equity_curve(returns: &[f64]) -> Vec<f64> {
    let mut equity = Vec::with_capacity(returns.len() + 1);
    let mut value = 1.0_f64;
    equity.push(value);
    for r in returns {
        value *= 1.0 + r;
        equity.push(value);
    }
    equity
}
