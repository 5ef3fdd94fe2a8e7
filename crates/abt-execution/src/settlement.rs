use abt_portfolio::{Asset, PositionBook};
use abt_types::Money;
use chrono::{DateTime, Utc};

use crate::fees::FeeSchedule;
use crate::order::Order;

/// Daily close routine (§4.6): cancels every still-open order (unfreezing
/// any BUY-side estimated cost), then promotes every position's
/// `available_volume` to `total_volume`.
///
/// Runs once per simulated day, before that day's strategy tick. Because
/// the matching engine is single-bar atomic, no open orders typically
/// survive to this point in the default configuration; the cancel step is
/// kept so alternative matching policies (limit orders spanning bars)
/// remain correct.
pub fn daily_settlement(
    open_orders: &mut [Order],
    asset: &mut Asset,
    positions: &mut PositionBook,
    fees: &FeeSchedule,
    now: DateTime<Utc>,
) {
    for order in open_orders.iter_mut() {
        if !order.status.is_open() {
            continue;
        }
        let remaining = order.volume - order.traded_volume;
        if matches!(order.direction, crate::order::Direction::Buy) {
            let estimated = order
                .limit_price
                .checked_mul_qty(remaining)
                .unwrap_or(Money::ZERO);
            let est_fees = fees.compute(estimated, false).total();
            let to_unfree = (estimated + est_fees).min(asset.frozen_cash);
            if to_unfree.ticks() > 0 {
                asset.unfreeze(to_unfree, now).expect("clamped to frozen_cash");
            }
        }
        order.cancel(now).expect("order was open");
    }

    for position in positions.values_mut() {
        position.settle_t_plus_1();
    }
}
