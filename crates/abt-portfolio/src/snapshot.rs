use abt_types::Money;
use chrono::{DateTime, Utc};

/// A point-in-time account summary recorded once per simulated day.
#[derive(Clone, Debug, PartialEq)]
pub struct DailySnapshot {
    pub date: DateTime<Utc>,
    pub total_asset: Money,
    pub available_cash: Money,
    pub market_value: Money,
    pub pnl_today: Money,
    pub return_today: f64,
}

impl DailySnapshot {
    /// Builds the next day's snapshot given the prior one (or `None` on the
    /// first day, in which case `pnl_today` is zero).
    pub fn record(
        date: DateTime<Utc>,
        total_asset: Money,
        available_cash: Money,
        market_value: Money,
        previous: Option<&DailySnapshot>,
    ) -> Self {
        let last_total = previous.map(|p| p.total_asset).unwrap_or(total_asset);
        let pnl_today = total_asset - last_total;
        let return_today = if last_total.ticks() > 0 {
            pnl_today.ticks() as f64 / last_total.ticks() as f64
        } else {
            0.0
        };
        Self {
            date,
            total_asset,
            available_cash,
            market_value,
            pnl_today,
            return_today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, 3, 15, 0, 0).unwrap()
    }

    #[test]
    fn first_snapshot_has_zero_pnl() {
        let snap = DailySnapshot::record(
            ts(),
            Money::from_f64(1_000_000.0),
            Money::from_f64(1_000_000.0),
            Money::ZERO,
            None,
        );
        assert_eq!(snap.pnl_today, Money::ZERO);
        assert_eq!(snap.return_today, 0.0);
    }

    #[test]
    fn subsequent_snapshot_computes_return() {
        let first = DailySnapshot::record(
            ts(),
            Money::from_f64(1_000_000.0),
            Money::from_f64(1_000_000.0),
            Money::ZERO,
            None,
        );
        let second = DailySnapshot::record(
            ts(),
            Money::from_f64(1_010_000.0),
            Money::from_f64(500_000.0),
            Money::from_f64(510_000.0),
            Some(&first),
        );
        assert_eq!(second.pnl_today.to_string(), "10000.00");
        assert!((second.return_today - 0.01).abs() < 1e-9);
    }
}
