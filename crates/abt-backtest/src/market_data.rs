use std::collections::BTreeMap;

use abt_types::{Bar, Timeframe};
use chrono::{DateTime, Utc};

/// Market-data interface (§6). Implementations MUST NOT return bars with
/// `timestamp > clock` (no look-ahead); an empty result is a valid
/// response (no data for that symbol yet).
pub trait MarketData {
    fn recent_bars(&self, symbol: &str, timeframe: Timeframe, limit: usize, clock: DateTime<Utc>) -> Vec<Bar>;
}

/// An in-memory, vector-backed market-data source. Bars are supplied
/// up-front (e.g. loaded from a CSV file) and filtered per call so the
/// driver never observes data beyond its current clock.
#[derive(Clone, Debug, Default)]
pub struct InMemoryMarketData {
    bars_by_symbol: BTreeMap<String, Vec<Bar>>,
}

impl InMemoryMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `bars` for `symbol`, sorted ascending by timestamp.
    pub fn with_bars(mut self, symbol: impl Into<String>, mut bars: Vec<Bar>) -> Self {
        bars.sort_by_key(|b| b.timestamp);
        self.bars_by_symbol.insert(symbol.into(), bars);
        self
    }
}

impl MarketData for InMemoryMarketData {
    fn recent_bars(&self, symbol: &str, timeframe: Timeframe, limit: usize, clock: DateTime<Utc>) -> Vec<Bar> {
        let Some(bars) = self.bars_by_symbol.get(symbol) else {
            return Vec::new();
        };
        let visible: Vec<&Bar> = bars
            .iter()
            .filter(|b| b.timeframe == timeframe && b.timestamp <= clock)
            .collect();
        let start = visible.len().saturating_sub(limit);
        visible[start..].iter().map(|b| (*b).clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abt_types::Money;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, day, 15, 0, 0).unwrap()
    }

    fn bar(day: u32) -> Bar {
        Bar::new(
            "600000.SH", Timeframe::OneDay, ts(day),
            Money::from_f64(10.0), Money::from_f64(10.0), Money::from_f64(10.0), Money::from_f64(10.0),
            10_000,
        )
        .unwrap()
    }

    #[test]
    fn recent_bars_excludes_look_ahead() {
        let md = InMemoryMarketData::new().with_bars(
            "600000.SH",
            vec![bar(1), bar(2), bar(3), bar(5)],
        );
        let visible = md.recent_bars("600000.SH", Timeframe::OneDay, 10, ts(3));
        assert_eq!(visible.len(), 3);
        assert_eq!(visible.last().unwrap().timestamp, ts(3));
    }

    #[test]
    fn recent_bars_respects_limit() {
        let md = InMemoryMarketData::new().with_bars(
            "600000.SH",
            vec![bar(1), bar(2), bar(3)],
        );
        let visible = md.recent_bars("600000.SH", Timeframe::OneDay, 2, ts(3));
        assert_eq!(visible.len(), 2);
        assert_eq!(visible[0].timestamp, ts(2));
    }

    #[test]
    fn unknown_symbol_returns_empty() {
        let md = InMemoryMarketData::new();
        assert!(md.recent_bars("000001.SZ", Timeframe::OneDay, 10, ts(1)).is_empty());
    }
}
