use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;

use abt_execution::{daily_settlement, place_order, Direction, FeeSchedule, Order, OrderType, RiskGate, TradeRecord};
use abt_portfolio::{Asset, DailySnapshot, PositionBook};
use abt_strategy::{SignalDirection, Strategy};
use abt_types::{floor_to_lot, Bar, Money, Timeframe, ValidationError, DEFAULT_LOT_SIZE};
use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use tracing::warn;

use crate::market_data::MarketData;

/// Fatal errors that abort the backtest entirely (§7: "ValidationError
/// during a Bar or Asset construction is fatal to the backtest").
#[derive(Debug)]
pub enum BacktestError {
    InvalidBar(ValidationError),
    EmptyUniverse,
}

impl fmt::Display for BacktestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BacktestError::InvalidBar(e) => write!(f, "invalid bar: {e}"),
            BacktestError::EmptyUniverse => write!(f, "universe must contain at least one symbol"),
        }
    }
}

impl Error for BacktestError {}

/// Output of a completed run: the driver's daily snapshots and the full
/// trade log. The [`abt-evaluator`] crate aggregates these into a
/// performance report.
#[derive(Clone, Debug)]
pub struct BacktestReport {
    pub snapshots: Vec<DailySnapshot>,
    pub trades: Vec<TradeRecord>,
    pub final_asset: Asset,
    pub final_positions: PositionBook,
}

/// Deterministic time-stepped loop orchestrating the account ledger, order
/// lifecycle, matching engine, and settlement against a strategy (§4.7,
/// §5). Single-threaded cooperative: the driver performs no parallelism
/// and uniquely owns the asset, positions, orders, and trade log.
pub struct BacktestDriver<M: MarketData, S: Strategy> {
    account_id: String,
    market: M,
    strategy: S,
    fees: FeeSchedule,
    risk_gate: RiskGate,
    asset: Asset,
    positions: PositionBook,
    open_orders: Vec<Order>,
    trades: Vec<TradeRecord>,
    snapshots: Vec<DailySnapshot>,
    next_order_seq: u64,
}

impl<M: MarketData, S: Strategy> BacktestDriver<M, S> {
    pub fn new(
        account_id: impl Into<String>,
        market: M,
        strategy: S,
        fees: FeeSchedule,
        initial_capital: Money,
        start: DateTime<Utc>,
    ) -> Self {
        let account_id = account_id.into();
        Self {
            asset: Asset::new(account_id.clone(), initial_capital, start),
            account_id,
            market,
            strategy,
            fees,
            risk_gate: RiskGate::default(),
            positions: PositionBook::new(),
            open_orders: Vec::new(),
            trades: Vec::new(),
            snapshots: Vec::new(),
            next_order_seq: 0,
        }
    }

    /// Runs the deterministic one-day-step loop over `[start, end]`
    /// (inclusive) for `universe`. Symbols are processed in the
    /// caller-supplied order; signals are processed in the order the
    /// strategy returned them.
    pub fn run(
        mut self,
        universe: &[String],
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<BacktestReport, BacktestError> {
        if universe.is_empty() {
            return Err(BacktestError::EmptyUniverse);
        }

        let mut date = start;
        while date <= end {
            let clock = Utc
                .from_utc_datetime(&date.and_hms_opt(15, 0, 0).expect("valid time"));

            daily_settlement(&mut self.open_orders, &mut self.asset, &mut self.positions, &self.fees, clock);
            self.open_orders.clear();

            let mut bars_per_symbol: BTreeMap<String, Vec<Bar>> = BTreeMap::new();
            let mut current_price: BTreeMap<String, Money> = BTreeMap::new();
            for symbol in universe {
                let bars = self.market.recent_bars(symbol, Timeframe::OneDay, 100, clock);
                if let Some(last) = bars.last() {
                    current_price.insert(symbol.clone(), last.close);
                }
                bars_per_symbol.insert(symbol.clone(), bars);
            }

            let signals = self.strategy.generate_signals(&bars_per_symbol, &self.positions);

            for signal in signals {
                let Some(price) = current_price.get(&signal.symbol).copied() else {
                    continue;
                };
                let volume = match signal.direction {
                    SignalDirection::Buy => {
                        let v = floor_to_lot(signal.target_volume, DEFAULT_LOT_SIZE);
                        if v < DEFAULT_LOT_SIZE {
                            continue;
                        }
                        v
                    }
                    SignalDirection::Sell => signal.target_volume,
                };
                if volume <= 0 {
                    continue;
                }

                let direction = match signal.direction {
                    SignalDirection::Buy => Direction::Buy,
                    SignalDirection::Sell => Direction::Sell,
                };

                self.next_order_seq += 1;
                let order_id = format!("bt-{:08}", self.next_order_seq);
                let mut order = match Order::new(
                    order_id,
                    self.account_id.clone(),
                    signal.symbol.clone(),
                    direction,
                    OrderType::Market,
                    price,
                    volume,
                    clock,
                ) {
                    Ok(order) => order,
                    Err(err) => {
                        warn!(target: "abt_backtest", symbol = %signal.symbol, error = %err, "order construction rejected");
                        continue;
                    }
                };

                let Some(bar) = bars_per_symbol.get(&signal.symbol).and_then(|b| b.last()) else {
                    continue;
                };

                match place_order(
                    &mut order,
                    bar,
                    &mut self.asset,
                    &mut self.positions,
                    &mut self.trades,
                    &self.fees,
                    &self.risk_gate,
                    clock,
                ) {
                    Ok(()) => {
                        if !order.status.is_terminal() {
                            self.open_orders.push(order);
                        }
                    }
                    Err(err) => {
                        warn!(target: "abt_backtest", symbol = %signal.symbol, error = %err, "order rejected");
                    }
                }
            }

            daily_settlement(&mut self.open_orders, &mut self.asset, &mut self.positions, &self.fees, clock);
            self.open_orders.clear();

            let market_value: Money = self
                .positions
                .iter()
                .map(|(symbol, position)| {
                    let price = current_price
                        .get(symbol)
                        .copied()
                        .unwrap_or(position.average_cost);
                    price.checked_mul_qty(position.total_volume).unwrap_or(Money::ZERO)
                })
                .fold(Money::ZERO, |acc, v| acc + v);

            self.asset.reconcile_total_asset(market_value, clock);

            let snapshot = DailySnapshot::record(
                clock,
                self.asset.total_asset,
                self.asset.available_cash,
                market_value,
                self.snapshots.last(),
            );
            self.snapshots.push(snapshot);

            date += Duration::days(1);
        }

        Ok(BacktestReport {
            snapshots: self.snapshots,
            trades: self.trades,
            final_asset: self.asset,
            final_positions: self.positions,
        })
    }
}
