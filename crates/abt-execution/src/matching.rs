use std::error::Error;
use std::fmt;

use abt_portfolio::{Asset, Position, PositionBook};
use abt_types::{Bar, Money};
use chrono::{DateTime, Utc};

use crate::fees::FeeSchedule;
use crate::order::{Direction, Order, OrderStatus};
use crate::risk::{RiskDecision, RiskGate};
use crate::trade::TradeRecord;

/// A business-level rejection (§7). The order is left in state `REJECTED`
/// (or never submitted, for a risk-gate rejection) and the ledger is left
/// untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OrderSubmitError {
    RiskRejected(String),
    InsufficientFunds,
    InsufficientPosition,
    InsufficientLiquidity,
}

impl fmt::Display for OrderSubmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderSubmitError::RiskRejected(reason) => write!(f, "{reason}"),
            OrderSubmitError::InsufficientFunds => write!(f, "insufficient funds"),
            OrderSubmitError::InsufficientPosition => write!(f, "insufficient position"),
            OrderSubmitError::InsufficientLiquidity => write!(f, "insufficient liquidity"),
        }
    }
}

impl Error for OrderSubmitError {}

/// Submits `order` against `bar`, mutating `asset`, `positions`, and
/// `order` itself on success, and appending a [`TradeRecord`] to `trades`.
///
/// All precondition checks (risk gate, capacity, funds/position) run
/// before any mutation, so a rejection never requires an explicit
/// rollback (§4.5).
pub fn place_order(
    order: &mut Order,
    bar: &Bar,
    asset: &mut Asset,
    positions: &mut PositionBook,
    trades: &mut Vec<TradeRecord>,
    fees: &FeeSchedule,
    risk_gate: &RiskGate,
    now: DateTime<Utc>,
) -> Result<(), OrderSubmitError> {
    let is_buy = matches!(order.direction, Direction::Buy);

    if let RiskDecision::Reject(reason) = risk_gate.check(order.limit_price, order.volume) {
        return Err(OrderSubmitError::RiskRejected(reason));
    }

    let exec_price = fees.exec_price(bar.close, is_buy);
    let max_fill = fees.max_fill(bar.volume);
    if max_fill < fees.lot_size {
        return Err(OrderSubmitError::InsufficientLiquidity);
    }
    let fill_volume = order.volume.min(max_fill);
    let amount = exec_price
        .checked_mul_qty(fill_volume)
        .expect("amount overflow");
    let breakdown = fees.compute(amount, !is_buy);
    let fees_total = breakdown.total();

    if is_buy {
        let estimated_total = amount + breakdown.commission + breakdown.transfer_fee;
        if asset.available_cash < estimated_total {
            return Err(OrderSubmitError::InsufficientFunds);
        }

        order.submit(now).expect("order must be CREATED before place_order");
        asset.freeze(estimated_total, now).expect("checked above");
        order.on_fill(fill_volume, exec_price, now).expect("fill within bounds");

        let position = positions
            .entry(order.ticker.clone())
            .or_insert_with(|| Position::new(order.account_id.clone(), order.ticker.clone()));
        position
            .on_buy_filled(fill_volume, exec_price)
            .expect("fill volume positive");

        asset.deduct_frozen(estimated_total, now).expect("checked above");
        asset.deduct_total_asset(fees_total, now);

        trades.push(TradeRecord {
            symbol: order.ticker.clone(),
            direction: Direction::Buy,
            executed_at: now,
            price: exec_price,
            volume: fill_volume,
            fees_total,
            realized_pnl: Money::ZERO,
            remark: order.remark.clone(),
        });
    } else {
        let available = positions.get(&order.ticker).map(|p| p.available_volume).unwrap_or(0);
        if available < fill_volume {
            return Err(OrderSubmitError::InsufficientPosition);
        }

        order.submit(now).expect("order must be CREATED before place_order");
        order.on_fill(fill_volume, exec_price, now).expect("fill within bounds");

        let position = positions.get_mut(&order.ticker).expect("checked above");
        let average_cost_before_sell = position.average_cost;
        let realized_pnl = (exec_price - average_cost_before_sell)
            .checked_mul_qty(fill_volume)
            .unwrap_or(Money::ZERO)
            - fees_total;
        position
            .on_sell_filled(fill_volume, exec_price)
            .expect("checked above");
        if position.is_flat() {
            positions.remove(&order.ticker);
        }

        // income can be non-positive when fees (the 5.00 commission floor,
        // in particular) exceed the sale proceeds; deposit() rejects
        // non-positive amounts, so credit available_cash directly here,
        // matching mock_trade.py's `_simulate_fill` (`available_cash += income`).
        // total_asset is only adjusted for the fee leg here, symmetric with
        // the BUY path above; the cash/position swap itself nets to zero
        // until the next mark-to-market reconciliation.
        let income = amount - fees_total;
        asset.available_cash += income;
        asset.updated_at = now;
        asset.deduct_total_asset(fees_total, now);

        trades.push(TradeRecord {
            symbol: order.ticker.clone(),
            direction: Direction::Sell,
            executed_at: now,
            price: exec_price,
            volume: fill_volume,
            fees_total,
            realized_pnl,
            remark: order.remark.clone(),
        });
    }

    if fill_volume < order.volume {
        order.status = OrderStatus::PartialCanceled;
        order.updated_at = now;
    }

    Ok(())
}
