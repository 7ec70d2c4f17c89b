//! Passive baseline: always long, never trades out.

use crate::domain::strategy::{Position, Signal, Strategy};

/// Constant "stay invested" reading; a buy, not a strong buy.
const HOLD_STRENGTH: f64 = 5.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct BuyAndHold;

impl Strategy for BuyAndHold {
    fn name(&self) -> &str {
        "Buy & Hold"
    }

    fn warmup(&self) -> usize {
        1
    }

    fn evaluate(&self, history: &[f64]) -> Option<Signal> {
        history.last().map(|_| Signal {
            position: Position::Long,
            strength: HOLD_STRENGTH,
        })
    }
}
