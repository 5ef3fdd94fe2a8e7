use abt_config::BacktestConfig;
use abt_execution::FeeSchedule;
use abt_types::Money;

/// Converts a loaded [`BacktestConfig`] into the [`FeeSchedule`] consumed
/// by the matching engine, plus the parsed initial capital.
pub fn fee_schedule_from_config(config: &BacktestConfig) -> FeeSchedule {
    FeeSchedule {
        slippage_buy: config.slippage_buy,
        slippage_sell: config.slippage_sell,
        commission_rate: config.commission_rate,
        min_commission: Money::from_f64(config.min_commission),
        transfer_fee_rate: config.transfer_fee_rate,
        stamp_duty_rate: config.stamp_duty_rate,
        capacity_limit_ratio: config.capacity_limit_ratio,
        lot_size: config.lot_size,
    }
}

pub fn initial_capital_from_config(config: &BacktestConfig) -> Money {
    Money::from_f64(config.initial_capital)
}
