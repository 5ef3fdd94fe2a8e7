//! abt-evaluator
//!
//! Aggregates daily snapshots and the trade log into a performance report
//! (§4.9). Pure function of its inputs: no IO, no mutation of the ledger
//! it reads from.

use abt_execution::{Direction, TradeRecord};
use abt_portfolio::DailySnapshot;
use abt_types::Money;
use chrono::{DateTime, Utc};

/// Aggregate performance metrics for a completed backtest run.
#[derive(Clone, Debug, PartialEq)]
pub struct PerformanceReport {
    pub initial_capital: Money,
    pub final_capital: Money,
    pub total_return: f64,
    pub annualized_return: f64,
    pub max_drawdown: f64,
    pub win_rate: f64,
    pub trade_count: usize,
}

/// Evaluates `snapshots` and `trades` over `[start, end]` (§4.9).
pub fn evaluate(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    initial_capital: Money,
    snapshots: &[DailySnapshot],
    trades: &[TradeRecord],
) -> PerformanceReport {
    if snapshots.is_empty() {
        return PerformanceReport {
            initial_capital,
            final_capital: initial_capital,
            total_return: 0.0,
            annualized_return: 0.0,
            max_drawdown: 0.0,
            win_rate: 0.0,
            trade_count: trades.len(),
        };
    }

    let final_total_asset = snapshots.last().unwrap().total_asset;
    let total_return = if initial_capital.ticks() != 0 {
        (final_total_asset - initial_capital).ticks() as f64 / initial_capital.ticks() as f64
    } else {
        0.0
    };

    let days = (end - start).num_days();
    let annualized_return = if days > 0 {
        (1.0 + total_return).powf(365.0 / days as f64) - 1.0
    } else {
        0.0
    };

    let mut running_peak = initial_capital.to_f64();
    let mut max_drawdown = 0.0_f64;
    for snap in snapshots {
        let value = snap.total_asset.to_f64();
        if value > running_peak {
            running_peak = value;
        }
        if running_peak > 0.0 {
            let drawdown = (running_peak - value) / running_peak;
            if drawdown > max_drawdown {
                max_drawdown = drawdown;
            }
        }
    }

    let sell_trades: Vec<&TradeRecord> = trades
        .iter()
        .filter(|t| matches!(t.direction, Direction::Sell))
        .collect();
    let win_rate = if sell_trades.is_empty() {
        0.0
    } else {
        let wins = sell_trades.iter().filter(|t| t.realized_pnl.is_non_negative() && !t.realized_pnl.is_zero()).count();
        wins as f64 / sell_trades.len() as f64
    };

    PerformanceReport {
        initial_capital,
        final_capital: final_total_asset,
        total_return,
        annualized_return,
        max_drawdown,
        win_rate,
        trade_count: trades.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2023, 1, day, 15, 0, 0).unwrap()
    }

    fn snapshot(day: u32, total_asset: f64) -> DailySnapshot {
        DailySnapshot {
            date: ts(day),
            total_asset: Money::from_f64(total_asset),
            available_cash: Money::from_f64(total_asset),
            market_value: Money::ZERO,
            pnl_today: Money::ZERO,
            return_today: 0.0,
        }
    }

    #[test]
    fn empty_snapshots_yield_all_zero_report() {
        let report = evaluate(ts(1), ts(10), Money::from_f64(1_000_000.0), &[], &[]);
        assert_eq!(report.final_capital, Money::from_f64(1_000_000.0));
        assert_eq!(report.total_return, 0.0);
        assert_eq!(report.max_drawdown, 0.0);
    }

    #[test]
    fn max_drawdown_tracks_running_peak() {
        let snaps = vec![
            snapshot(1, 1_000_000.0),
            snapshot(2, 1_100_000.0),
            snapshot(3, 900_000.0),
            snapshot(4, 1_050_000.0),
        ];
        let report = evaluate(ts(1), ts(4), Money::from_f64(1_000_000.0), &snaps, &[]);
        let expected_drawdown = (1_100_000.0 - 900_000.0) / 1_100_000.0;
        assert!((report.max_drawdown - expected_drawdown).abs() < 1e-9);
    }

    #[test]
    fn win_rate_counts_only_sell_trades_with_positive_pnl() {
        let trades = vec![
            TradeRecord {
                symbol: "600000.SH".into(),
                direction: Direction::Buy,
                executed_at: ts(1),
                price: Money::from_f64(10.0),
                volume: 100,
                fees_total: Money::ZERO,
                realized_pnl: Money::ZERO,
                remark: String::new(),
            },
            TradeRecord {
                symbol: "600000.SH".into(),
                direction: Direction::Sell,
                executed_at: ts(2),
                price: Money::from_f64(11.0),
                volume: 100,
                fees_total: Money::ZERO,
                realized_pnl: Money::from_f64(95.0),
                remark: String::new(),
            },
            TradeRecord {
                symbol: "600000.SH".into(),
                direction: Direction::Sell,
                executed_at: ts(3),
                price: Money::from_f64(9.0),
                volume: 100,
                fees_total: Money::ZERO,
                realized_pnl: Money::from_f64(-105.0),
                remark: String::new(),
            },
        ];
        let snaps = vec![snapshot(3, 1_000_000.0)];
        let report = evaluate(ts(1), ts(3), Money::from_f64(1_000_000.0), &snaps, &trades);
        assert_eq!(report.win_rate, 0.5);
        assert_eq!(report.trade_count, 3);
    }
}
