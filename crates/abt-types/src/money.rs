use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Scale of the internal integer representation: four fractional digits.
pub const MONEY_SCALE: i64 = 10_000;

/// A signed, fixed-point monetary value scaled by [`MONEY_SCALE`] (ticks of
/// 1/10,000 of a currency unit). No floating-point arithmetic is used for
/// accumulation; conversion to/from `f64` only happens at construction and
/// display boundaries.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);
    pub const MAX: Money = Money(i64::MAX);
    pub const MIN: Money = Money(i64::MIN);

    /// Builds a `Money` from raw ticks (1 tick = 1/10,000 of a currency unit).
    pub const fn from_ticks(ticks: i64) -> Self {
        Money(ticks)
    }

    /// Builds a `Money` from a decimal float, rounding to the nearest tick.
    /// Only used at parse/construction boundaries (config, CSV, literals).
    pub fn from_f64(amount: f64) -> Self {
        Money((amount * MONEY_SCALE as f64).round() as i64)
    }

    pub const fn ticks(self) -> i64 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / MONEY_SCALE as f64
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn is_non_negative(self) -> bool {
        self.0 >= 0
    }

    pub fn abs(self) -> Money {
        Money(self.0.abs())
    }

    pub fn saturating_add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }

    pub fn saturating_sub(self, other: Money) -> Money {
        Money(self.0.saturating_sub(other.0))
    }

    /// Multiplies by an integer share count. Used for `price * volume`.
    pub fn checked_mul_qty(self, qty: i64) -> Option<Money> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Multiplies by a rate expressed as a float (e.g. 0.00025 for 2.5 bps),
    /// rounding to the nearest tick. Rates come from configuration, which is
    /// why this is the one place float arithmetic re-enters the money path.
    pub fn mul_rate(self, rate: f64) -> Money {
        Money((self.0 as f64 * rate).round() as i64)
    }

    /// Returns the larger of `self` and `floor` (used for fee floors).
    pub fn max(self, other: Money) -> Money {
        if self.0 >= other.0 {
            self
        } else {
            other
        }
    }

    /// Approximate equality within the spec's observation tolerance (0.01).
    pub fn approx_eq(self, other: Money, tolerance: Money) -> bool {
        (self.0 - other.0).abs() <= tolerance.0
    }
}

impl Add for Money {
    type Output = Money;
    fn add(self, rhs: Money) -> Money {
        Money(self.0 + rhs.0)
    }
}

impl Sub for Money {
    type Output = Money;
    fn sub(self, rhs: Money) -> Money {
        Money(self.0 - rhs.0)
    }
}

impl Neg for Money {
    type Output = Money;
    fn neg(self) -> Money {
        Money(-self.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let negative = self.0 < 0;
        let abs = self.0.unsigned_abs();
        let mut whole = abs / MONEY_SCALE as u64;
        let frac = abs % MONEY_SCALE as u64;
        // Display with two decimal places (spec §3); internal scale keeps four.
        let mut cents = (frac + 50) / 100;
        if cents == 100 {
            cents = 0;
            whole += 1;
        }
        if negative && (whole != 0 || cents != 0) {
            write!(f, "-{}.{:02}", whole, cents)
        } else if negative {
            write!(f, "-0.00")
        } else {
            write!(f, "{}.{:02}", whole, cents)
        }
    }
}

impl fmt::Debug for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Money({})", self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_f64_round_trips_to_two_decimals() {
        let m = Money::from_f64(1006.01);
        assert_eq!(m.ticks(), 10_060_100);
        assert_eq!(m.to_string(), "1006.01");
    }

    #[test]
    fn add_sub_are_exact() {
        let a = Money::from_f64(1_000_000.00);
        let b = Money::from_f64(1006.01);
        let c = a - b;
        assert_eq!(c.to_string(), "998993.99");
        assert_eq!((c + b), a);
    }

    #[test]
    fn max_picks_fee_floor() {
        let fee = Money::from_f64(0.2503);
        let floor = Money::from_f64(5.00);
        assert_eq!(fee.max(floor), floor);
    }

    #[test]
    fn mul_rate_matches_commission_example() {
        let amount = Money::from_f64(1001.00);
        let commission = amount.mul_rate(0.00025);
        assert_eq!(commission.to_string(), "0.25");
    }

    #[test]
    fn negative_display_handles_small_magnitudes() {
        let m = Money::from_ticks(-1);
        assert_eq!(m.to_string(), "-0.00");
    }

    #[test]
    fn approx_eq_tolerates_half_cent() {
        let a = Money::from_f64(10.00);
        let b = Money::from_f64(10.0049);
        assert!(a.approx_eq(b, Money::from_f64(0.01)));
    }

    #[test]
    fn checked_mul_qty_computes_amount() {
        let price = Money::from_f64(10.01);
        let amount = price.checked_mul_qty(100).unwrap();
        assert_eq!(amount.to_string(), "1001.00");
    }
}
