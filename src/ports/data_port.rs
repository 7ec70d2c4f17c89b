//! Data access port trait.

use crate::domain::error::StockSenseError;
use crate::domain::ohlcv::OhlcvBar;

pub trait DataPort {
    /// All bars for `ticker`, in source order.
    fn load_bars(&self, ticker: &str) -> Result<Vec<OhlcvBar>, StockSenseError>;
}
