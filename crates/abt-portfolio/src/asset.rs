use std::error::Error;
use std::fmt;

use abt_types::Money;
use chrono::{DateTime, Utc};

/// Raised by an [`Asset`] operation whose precondition fails. Each
/// operation either fully succeeds or fails without mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AssetError {
    NonPositiveAmount { value: String },
    InsufficientAvailable { requested: String, available: String },
    InsufficientFrozen { requested: String, frozen: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::NonPositiveAmount { value } => {
                write!(f, "amount must be positive, got {value}")
            }
            AssetError::InsufficientAvailable { requested, available } => {
                write!(f, "cannot freeze {requested}, only {available} available")
            }
            AssetError::InsufficientFrozen { requested, frozen } => {
                write!(f, "cannot release {requested}, only {frozen} frozen")
            }
        }
    }
}

impl Error for AssetError {}

/// Cash ledger: available + frozen, with invariant enforcement.
///
/// Invariants: `available_cash >= 0`, `frozen_cash >= 0`;
/// `available_cash + frozen_cash + sum(mark-to-market) == total_asset`
/// holds after every snapshot (§3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Asset {
    pub account_id: String,
    pub total_asset: Money,
    pub available_cash: Money,
    pub frozen_cash: Money,
    pub updated_at: DateTime<Utc>,
}

impl Asset {
    pub fn new(account_id: impl Into<String>, initial_capital: Money, now: DateTime<Utc>) -> Self {
        Self {
            account_id: account_id.into(),
            total_asset: initial_capital,
            available_cash: initial_capital,
            frozen_cash: Money::ZERO,
            updated_at: now,
        }
    }

    /// Moves `amount` from available to frozen cash.
    pub fn freeze(&mut self, amount: Money, now: DateTime<Utc>) -> Result<(), AssetError> {
        if amount.is_negative() || amount.is_zero() {
            return Err(AssetError::NonPositiveAmount {
                value: amount.to_string(),
            });
        }
        if amount > self.available_cash {
            return Err(AssetError::InsufficientAvailable {
                requested: amount.to_string(),
                available: self.available_cash.to_string(),
            });
        }
        self.available_cash -= amount;
        self.frozen_cash += amount;
        self.updated_at = now;
        Ok(())
    }

    /// Moves `amount` back from frozen to available cash.
    pub fn unfreeze(&mut self, amount: Money, now: DateTime<Utc>) -> Result<(), AssetError> {
        if amount.is_negative() || amount.is_zero() {
            return Err(AssetError::NonPositiveAmount {
                value: amount.to_string(),
            });
        }
        if amount > self.frozen_cash {
            return Err(AssetError::InsufficientFrozen {
                requested: amount.to_string(),
                frozen: self.frozen_cash.to_string(),
            });
        }
        self.frozen_cash -= amount;
        self.available_cash += amount;
        self.updated_at = now;
        Ok(())
    }

    /// Removes `amount` from frozen cash without touching `total_asset`:
    /// the cash is being converted into a non-cash holding, which is
    /// accounted for separately when the snapshot marks to market.
    pub fn deduct_frozen(&mut self, amount: Money, now: DateTime<Utc>) -> Result<(), AssetError> {
        if amount.is_negative() || amount.is_zero() {
            return Err(AssetError::NonPositiveAmount {
                value: amount.to_string(),
            });
        }
        if amount > self.frozen_cash {
            return Err(AssetError::InsufficientFrozen {
                requested: amount.to_string(),
                frozen: self.frozen_cash.to_string(),
            });
        }
        self.frozen_cash -= amount;
        self.updated_at = now;
        Ok(())
    }

    /// Adds `amount` to both available cash and total asset (e.g. SELL
    /// proceeds net of fees).
    pub fn deposit(&mut self, amount: Money, now: DateTime<Utc>) -> Result<(), AssetError> {
        if amount.is_negative() || amount.is_zero() {
            return Err(AssetError::NonPositiveAmount {
                value: amount.to_string(),
            });
        }
        self.available_cash += amount;
        self.total_asset += amount;
        self.updated_at = now;
        Ok(())
    }

    /// Deducts `amount` from `total_asset` only, used when fees are paid
    /// out of a fill that has already moved cash elsewhere (freeze/deposit).
    pub fn deduct_total_asset(&mut self, amount: Money, now: DateTime<Utc>) {
        self.total_asset -= amount;
        self.updated_at = now;
    }

    /// Recomputes `total_asset` as the snapshot-authoritative sum of cash
    /// and mark-to-market position value (§9 "total_asset" resolution).
    pub fn reconcile_total_asset(&mut self, market_value: Money, now: DateTime<Utc>) {
        self.total_asset = self.available_cash + self.frozen_cash + market_value;
        self.updated_at = now;
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
    fn freeze_then_deduct_preserves_total_asset() {
        let mut asset = Asset::new("acct", Money::from_f64(1_000_000.0), ts());
        asset.freeze(Money::from_f64(1006.01), ts()).unwrap();
        assert_eq!(asset.available_cash.to_string(), "998993.99");
        assert_eq!(asset.frozen_cash.to_string(), "1006.01");
        asset.deduct_frozen(Money::from_f64(1006.01), ts()).unwrap();
        assert_eq!(asset.frozen_cash, Money::ZERO);
        // total_asset untouched by deduct_frozen; conserved as cash -> holding.
        assert_eq!(asset.total_asset.to_string(), "1000000.00");
    }

    #[test]
    fn freeze_rejects_beyond_available() {
        let mut asset = Asset::new("acct", Money::from_f64(100.0), ts());
        let err = asset.freeze(Money::from_f64(200.0), ts()).unwrap_err();
        assert!(matches!(err, AssetError::InsufficientAvailable { .. }));
        assert_eq!(asset.available_cash.to_string(), "100.00");
    }

    #[test]
    fn deposit_grows_available_and_total() {
        let mut asset = Asset::new("acct", Money::from_f64(1000.0), ts());
        asset.deposit(Money::from_f64(50.0), ts()).unwrap();
        assert_eq!(asset.available_cash.to_string(), "1050.00");
        assert_eq!(asset.total_asset.to_string(), "1050.00");
    }

    #[test]
    fn reconcile_total_asset_matches_snapshot_formula() {
        let mut asset = Asset::new("acct", Money::from_f64(1_000_000.0), ts());
        asset.freeze(Money::from_f64(1000.0), ts()).unwrap();
        asset.reconcile_total_asset(Money::from_f64(1000.0), ts());
        assert_eq!(asset.total_asset.to_string(), "1000000.00");
    }
}
