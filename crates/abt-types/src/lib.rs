//! abt-types
//!
//! Decimal-safe money arithmetic, lot-size-aware share counts, and the
//! immutable `Bar` record shared across the backtest engine. Pure data: no
//! IO, no time source, no broker wiring.

mod bar;
mod error;
mod money;
mod shares;

pub use bar::{exchange_suffix, Bar, Timeframe};
pub use error::ValidationError;
pub use money::{Money, MONEY_SCALE};
pub use shares::{floor_to_lot, ShareCount, DEFAULT_LOT_SIZE};
