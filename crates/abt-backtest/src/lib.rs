//! abt-backtest
//!
//! The backtest driver (C9): a deterministic, single-threaded loop that
//! advances the simulation clock one day at a time, running settlement,
//! the strategy, the risk gate, and the matching engine in the order
//! required by §4.7 and §5, and recording a daily snapshot.

mod config_bridge;
mod driver;
mod market_data;

pub use config_bridge::{fee_schedule_from_config, initial_capital_from_config};
pub use driver::{BacktestDriver, BacktestError, BacktestReport};
pub use market_data::{InMemoryMarketData, MarketData};
