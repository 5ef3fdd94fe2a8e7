use abt_types::{Money, ShareCount};

/// The A-share fee schedule and microstructure constants consumed by the
/// matching engine (§4.5, §6 "Configuration").
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeeSchedule {
    pub slippage_buy: f64,
    pub slippage_sell: f64,
    pub commission_rate: f64,
    pub min_commission: Money,
    pub transfer_fee_rate: f64,
    pub stamp_duty_rate: f64,
    pub capacity_limit_ratio: f64,
    pub lot_size: ShareCount,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            slippage_buy: 0.001,
            slippage_sell: 0.001,
            commission_rate: 0.00025,
            min_commission: Money::from_f64(5.00),
            transfer_fee_rate: 0.00001,
            stamp_duty_rate: 0.0005,
            capacity_limit_ratio: 0.10,
            lot_size: 100,
        }
    }
}

/// The three-part fee breakdown for a single fill (§4.5).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FeeBreakdown {
    pub commission: Money,
    pub transfer_fee: Money,
    pub stamp_duty: Money,
}

impl FeeBreakdown {
    pub fn total(&self) -> Money {
        self.commission + self.transfer_fee + self.stamp_duty
    }
}

impl FeeSchedule {
    /// Computes fees on `amount = exec_price * fill_volume`. Stamp duty
    /// applies to SELL fills only.
    pub fn compute(&self, amount: Money, is_sell: bool) -> FeeBreakdown {
        let commission = amount.mul_rate(self.commission_rate).max(self.min_commission);
        let transfer_fee = amount.mul_rate(self.transfer_fee_rate);
        let stamp_duty = if is_sell {
            amount.mul_rate(self.stamp_duty_rate)
        } else {
            Money::ZERO
        };
        FeeBreakdown { commission, transfer_fee, stamp_duty }
    }

    /// `exec_price = close * (1 +/- slippage)` depending on side.
    pub fn exec_price(&self, close: Money, is_buy: bool) -> Money {
        if is_buy {
            close.mul_rate(1.0 + self.slippage_buy)
        } else {
            close.mul_rate(1.0 - self.slippage_sell)
        }
    }

    /// `floor(bar_volume * capacity_limit_ratio / lot_size) * lot_size`.
    pub fn max_fill(&self, bar_volume: i64) -> ShareCount {
        let capacity = (bar_volume as f64 * self.capacity_limit_ratio) as i64;
        abt_types::floor_to_lot(capacity, self.lot_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exec_price_applies_slippage() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.exec_price(Money::from_f64(10.0), true).to_string(), "10.01");
        assert_eq!(fees.exec_price(Money::from_f64(10.0), false).to_string(), "9.99");
    }

    #[test]
    fn commission_is_floored() {
        let fees = FeeSchedule::default();
        let breakdown = fees.compute(Money::from_f64(1001.00), false);
        assert_eq!(breakdown.commission.to_string(), "5.00");
        assert_eq!(breakdown.transfer_fee.to_string(), "0.01");
        assert_eq!(breakdown.stamp_duty, Money::ZERO);
    }

    #[test]
    fn stamp_duty_applies_to_sell_only() {
        let fees = FeeSchedule::default();
        let sell = fees.compute(Money::from_f64(999.00), true);
        assert_eq!(sell.stamp_duty.to_string(), "0.50");
    }

    #[test]
    fn max_fill_floors_to_lot() {
        let fees = FeeSchedule::default();
        assert_eq!(fees.max_fill(10_000), 1000);
        assert_eq!(fees.max_fill(500), 0);
    }
}
