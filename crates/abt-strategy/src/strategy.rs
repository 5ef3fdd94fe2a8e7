use std::collections::BTreeMap;

use abt_portfolio::PositionBook;
use abt_types::Bar;

use crate::types::Signal;

/// Strategy interface (§6): given each symbol's visible bar history and
/// the current positions, emit zero or more trading signals. Stateless
/// per call; no broker/DB access; the driver guarantees `market_data`
/// never contains bars later than the current clock (no look-ahead).
pub trait Strategy: Send + Sync {
    fn name(&self) -> &str;

    fn generate_signals(
        &self,
        market_data: &BTreeMap<String, Vec<Bar>>,
        positions: &PositionBook,
    ) -> Vec<Signal>;
}
