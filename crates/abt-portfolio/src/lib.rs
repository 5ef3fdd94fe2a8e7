//! abt-portfolio
//!
//! Account ledger primitives: average-cost-basis positions with T+1
//! available-volume tracking, and the cash ledger (available/frozen)
//! enforcing freeze/unfreeze/deduct invariants. Pure deterministic logic
//! (no IO, no time source beyond a passed-in clock, no broker wiring).

mod asset;
mod position;
mod snapshot;

pub use asset::{Asset, AssetError};
pub use position::{Position, PositionError};
pub use snapshot::DailySnapshot;

use std::collections::BTreeMap;

/// Canonical positions-by-symbol map, keyed for deterministic iteration.
pub type PositionBook = BTreeMap<String, Position>;
