//! Historical bar source port trait.
//!
//! Implemented by whatever collaborator can supply bars (files, a broker
//! gateway, a market data API). The engine never talks to it directly.

use crate::domain::error::TechnicalsError;
use crate::domain::ohlcv::OhlcvBar;

pub trait DataPort {
    /// The most recent `limit` bars for `symbol`, oldest first.
    fn fetch_bars(
        &self,
        symbol: &str,
        limit: usize,
        timeframe: &str,
    ) -> Result<Vec<OhlcvBar>, TechnicalsError>;

    fn list_symbols(&self, timeframe: &str) -> Result<Vec<String>, TechnicalsError>;
}
