use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;

/// Bar sampling period. The engine itself only ever drives `OneDay` bars
/// (§4.7), but the type carries the full set so a market-data adapter can
/// report its native resolution.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    OneDay,
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::OneMinute => "1m",
            Timeframe::FiveMinutes => "5m",
            Timeframe::FifteenMinutes => "15m",
            Timeframe::ThirtyMinutes => "30m",
            Timeframe::OneHour => "1h",
            Timeframe::OneDay => "1d",
        };
        write!(f, "{s}")
    }
}

/// An OHLCV record keyed by (symbol, timeframe, timestamp). Bars are
/// immutable once loaded and are assumed front-adjusted (no ex-date
/// handling performed by this crate).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub timeframe: Timeframe,
    pub timestamp: DateTime<Utc>,
    pub open: Money,
    pub high: Money,
    pub low: Money,
    pub close: Money,
    pub volume: i64,
}

impl Bar {
    /// Constructs a `Bar`, enforcing `low <= open,close <= high` and
    /// `volume >= 0`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        symbol: impl Into<String>,
        timeframe: Timeframe,
        timestamp: DateTime<Utc>,
        open: Money,
        high: Money,
        low: Money,
        close: Money,
        volume: i64,
    ) -> Result<Self, ValidationError> {
        let symbol = symbol.into();
        if symbol.is_empty() {
            return Err(ValidationError::EmptySymbol);
        }
        if low > high {
            return Err(ValidationError::InvalidBarRange {
                low: low.to_string(),
                high: high.to_string(),
            });
        }
        if open < low || open > high || close < low || close > high {
            return Err(ValidationError::InvalidBarRange {
                low: low.to_string(),
                high: high.to_string(),
            });
        }
        if volume < 0 {
            return Err(ValidationError::NegativeVolume { value: volume });
        }
        Ok(Self {
            symbol,
            timeframe,
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        })
    }
}

/// Parses a symbol of the form `TICKER.EXCHANGE`, returning the exchange
/// suffix (`SH` or `SZ`) if present.
pub fn exchange_suffix(symbol: &str) -> Option<&str> {
    symbol.rsplit('.').next().filter(|s| !s.is_empty() && *s != symbol)
}
