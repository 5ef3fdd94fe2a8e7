use std::error::Error;
use std::fmt;

use abt_types::{Money, ShareCount, ValidationError, DEFAULT_LOT_SIZE};
use chrono::{DateTime, Utc};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Buy,
    Sell,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Buy => write!(f, "BUY"),
            Direction::Sell => write!(f, "SELL"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderType {
    Limit,
    Market,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum OrderStatus {
    Created,
    Submitted,
    PartialFilled,
    Filled,
    Canceled,
    PartialCanceled,
    Rejected,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            OrderStatus::Filled
                | OrderStatus::Canceled
                | OrderStatus::PartialCanceled
                | OrderStatus::Rejected
        )
    }

    pub fn is_open(self) -> bool {
        matches!(self, OrderStatus::Submitted | OrderStatus::PartialFilled)
    }
}

/// An illegal state-machine transition. A programmer error; it terminates
/// the containing operation but the calling driver continues with the
/// next signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransitionError {
    pub from: OrderStatus,
    pub event: &'static str,
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cannot apply {} from state {:?}", self.event, self.from)
    }
}

impl Error for TransitionError {}

/// Order entity plus its lifecycle state machine (§4.3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Order {
    pub order_id: String,
    pub account_id: String,
    pub ticker: String,
    pub direction: Direction,
    pub order_type: OrderType,
    pub limit_price: Money,
    pub volume: ShareCount,
    pub status: OrderStatus,
    pub traded_volume: ShareCount,
    pub avg_traded_price: Money,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub remark: String,
}

impl Order {
    /// Constructs a `CREATED` order, validating BUY lot-size and positive
    /// price/volume.
    pub fn new(
        order_id: impl Into<String>,
        account_id: impl Into<String>,
        ticker: impl Into<String>,
        direction: Direction,
        order_type: OrderType,
        limit_price: Money,
        volume: ShareCount,
        created_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        if volume <= 0 {
            return Err(ValidationError::NonPositiveVolume { value: volume });
        }
        if limit_price.is_negative() {
            return Err(ValidationError::NonPositivePrice {
                field: "limit_price",
                value: limit_price.to_string(),
            });
        }
        if matches!(direction, Direction::Buy) && volume % DEFAULT_LOT_SIZE != 0 {
            return Err(ValidationError::NonLotVolume {
                value: volume,
                lot_size: DEFAULT_LOT_SIZE,
            });
        }
        Ok(Self {
            order_id: order_id.into(),
            account_id: account_id.into(),
            ticker: ticker.into(),
            direction,
            order_type,
            limit_price,
            volume,
            status: OrderStatus::Created,
            traded_volume: 0,
            avg_traded_price: Money::ZERO,
            created_at,
            updated_at: created_at,
            remark: String::new(),
        })
    }

    pub fn submit(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        match self.status {
            OrderStatus::Created => {
                self.status = OrderStatus::Submitted;
                self.updated_at = now;
                Ok(())
            }
            other => Err(TransitionError { from: other, event: "submit" }),
        }
    }

    /// Applies a fill slice: requires the order is open and
    /// `traded_volume + volume <= self.volume`. Updates `avg_traded_price`
    /// as a volume-weighted mean and transitions to `FILLED` iff the order
    /// is now fully traded, else `PARTIAL_FILLED`.
    pub fn on_fill(
        &mut self,
        volume: ShareCount,
        price: Money,
        now: DateTime<Utc>,
    ) -> Result<(), TransitionError> {
        if !self.status.is_open() {
            return Err(TransitionError { from: self.status, event: "on_fill" });
        }
        let new_traded = self.traded_volume + volume;
        if new_traded > self.volume {
            return Err(TransitionError { from: self.status, event: "on_fill" });
        }
        let prior_notional = self
            .avg_traded_price
            .checked_mul_qty(self.traded_volume)
            .unwrap_or(Money::ZERO);
        let fill_notional = price.checked_mul_qty(volume).unwrap_or(Money::ZERO);
        self.avg_traded_price = if new_traded > 0 {
            Money::from_ticks((prior_notional + fill_notional).ticks() / new_traded)
        } else {
            Money::ZERO
        };
        self.traded_volume = new_traded;
        self.status = if new_traded == self.volume {
            OrderStatus::Filled
        } else {
            OrderStatus::PartialFilled
        };
        self.updated_at = now;
        Ok(())
    }

    /// Cancels an open order. `SUBMITTED` -> `CANCELED`;
    /// `PARTIAL_FILLED` -> `PARTIAL_CANCELED`.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<(), TransitionError> {
        match self.status {
            OrderStatus::Submitted => {
                self.status = OrderStatus::Canceled;
                self.updated_at = now;
                Ok(())
            }
            OrderStatus::PartialFilled => {
                self.status = OrderStatus::PartialCanceled;
                self.updated_at = now;
                Ok(())
            }
            other => Err(TransitionError { from: other, event: "cancel" }),
        }
    }

    pub fn reject(&mut self, reason: impl Into<String>, now: DateTime<Utc>) -> Result<(), TransitionError> {
        match self.status {
            OrderStatus::Submitted => {
                self.status = OrderStatus::Rejected;
                self.remark = reason.into();
                self.updated_at = now;
                Ok(())
            }
            other => Err(TransitionError { from: other, event: "reject" }),
        }
    }
}
