use std::error::Error;
use std::fmt;

use abt_types::{Money, ShareCount};

/// Raised by a [`Position`] operation whose precondition fails. Each
/// operation either fully succeeds or fails without mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PositionError {
    NonPositiveVolume { value: ShareCount },
    InsufficientAvailable { requested: ShareCount, available: ShareCount },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::NonPositiveVolume { value } => {
                write!(f, "fill volume must be positive, got {value}")
            }
            PositionError::InsufficientAvailable { requested, available } => {
                write!(
                    f,
                    "cannot sell {requested} shares, only {available} available"
                )
            }
        }
    }
}

impl Error for PositionError {}

/// Per-symbol holding with T+1 available-volume tracking.
///
/// Invariants: `0 <= available_volume <= total_volume`;
/// `total_volume == 0 => average_cost == Money::ZERO`; `average_cost` is a
/// moving volume-weighted mean updated on BUY fills only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub account_id: String,
    pub ticker: String,
    pub total_volume: ShareCount,
    pub available_volume: ShareCount,
    pub average_cost: Money,
}

impl Position {
    pub fn new(account_id: impl Into<String>, ticker: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ticker: ticker.into(),
            total_volume: 0,
            available_volume: 0,
            average_cost: Money::ZERO,
        }
    }

    pub fn is_flat(&self) -> bool {
        self.total_volume == 0
    }

    /// Applies a BUY fill: recomputes the weighted-average cost basis and
    /// grows `total_volume`. `available_volume` is left unchanged — bought
    /// shares are not sellable until the next day's settlement (T+1).
    pub fn on_buy_filled(&mut self, volume: ShareCount, price: Money) -> Result<(), PositionError> {
        if volume <= 0 {
            return Err(PositionError::NonPositiveVolume { value: volume });
        }
        let new_total = self.total_volume + volume;
        let prior_cost_ticks = self.average_cost.checked_mul_qty(self.total_volume).unwrap_or(Money::ZERO);
        let fill_cost_ticks = price.checked_mul_qty(volume).unwrap_or(Money::ZERO);
        let combined_ticks = (prior_cost_ticks + fill_cost_ticks).ticks();
        let new_average = Money::from_ticks(combined_ticks / new_total);
        self.total_volume = new_total;
        self.average_cost = new_average;
        Ok(())
    }

    /// Applies a SELL fill: decrements both volumes by `volume`. Does not
    /// change `average_cost` unless the position is fully closed, in which
    /// case the cost basis resets to zero.
    pub fn on_sell_filled(&mut self, volume: ShareCount, _price: Money) -> Result<(), PositionError> {
        if volume <= 0 {
            return Err(PositionError::NonPositiveVolume { value: volume });
        }
        if volume > self.available_volume {
            return Err(PositionError::InsufficientAvailable {
                requested: volume,
                available: self.available_volume,
            });
        }
        self.total_volume -= volume;
        self.available_volume -= volume;
        if self.total_volume == 0 {
            self.average_cost = Money::ZERO;
        }
        Ok(())
    }

    /// Promotes all prior-day holdings to sellable. Idempotent.
    pub fn settle_t_plus_1(&mut self) {
        self.available_volume = self.total_volume;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn on_buy_filled_updates_weighted_average_cost() {
        let mut pos = Position::new("acct", "600000.SH");
        pos.on_buy_filled(100, Money::from_f64(10.01)).unwrap();
        assert_eq!(pos.total_volume, 100);
        assert_eq!(pos.available_volume, 0);
        assert_eq!(pos.average_cost.to_string(), "10.01");

        pos.on_buy_filled(100, Money::from_f64(12.01)).unwrap();
        assert_eq!(pos.total_volume, 200);
        assert_eq!(pos.average_cost.to_string(), "11.01");
    }

    #[test]
    fn on_sell_filled_rejects_beyond_available() {
        let mut pos = Position::new("acct", "600000.SH");
        pos.on_buy_filled(100, Money::from_f64(10.0)).unwrap();
        let err = pos.on_sell_filled(1, Money::from_f64(10.0)).unwrap_err();
        assert!(matches!(err, PositionError::InsufficientAvailable { .. }));
    }

    #[test]
    fn settle_t_plus_1_promotes_full_holding() {
        let mut pos = Position::new("acct", "600000.SH");
        pos.on_buy_filled(100, Money::from_f64(10.01)).unwrap();
        pos.settle_t_plus_1();
        assert_eq!(pos.available_volume, 100);
    }

    #[test]
    fn on_sell_filled_resets_cost_basis_when_flat() {
        let mut pos = Position::new("acct", "600000.SH");
        pos.on_buy_filled(100, Money::from_f64(10.01)).unwrap();
        pos.settle_t_plus_1();
        pos.on_sell_filled(100, Money::from_f64(9.99)).unwrap();
        assert!(pos.is_flat());
        assert_eq!(pos.average_cost, Money::ZERO);
    }
}
