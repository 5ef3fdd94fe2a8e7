use abt_types::{Money, ShareCount};
use chrono::{DateTime, Utc};

use crate::order::Direction;

/// A single executed fill, as recorded in the trade log (§3 "TradeRecord").
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TradeRecord {
    pub symbol: String,
    pub direction: Direction,
    pub executed_at: DateTime<Utc>,
    pub price: Money,
    pub volume: ShareCount,
    pub fees_total: Money,
    pub realized_pnl: Money,
    pub remark: String,
}
