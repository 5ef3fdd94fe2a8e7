//! abt-strategy
//!
//! The strategy interface (§6) plus the dual moving-average reference
//! strategy (§4.8). Strategies are stateless, pure functions of visible
//! bar history and current positions; no broker/DB access.

mod dual_ma;
mod strategy;
mod types;

pub use dual_ma::DualMovingAverageStrategy;
pub use strategy::Strategy;
pub use types::{Signal, SignalDirection};
