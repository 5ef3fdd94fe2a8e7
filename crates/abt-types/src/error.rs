use std::error::Error;
use std::fmt;

/// Raised when an entity fails validation at construction time.
///
/// A `ValidationError` is never caught internally; callers propagate it
/// (or, at a backtest's data-loading boundary, treat it as fatal).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    NonPositivePrice { field: &'static str, value: String },
    NonPositiveVolume { value: i64 },
    NonLotVolume { value: i64, lot_size: i64 },
    InvalidBarRange { low: String, high: String },
    NegativeVolume { value: i64 },
    EmptySymbol,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::NonPositivePrice { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            ValidationError::NonPositiveVolume { value } => {
                write!(f, "volume must be positive, got {value}")
            }
            ValidationError::NonLotVolume { value, lot_size } => {
                write!(f, "BUY volume {value} is not a multiple of lot size {lot_size}")
            }
            ValidationError::InvalidBarRange { low, high } => {
                write!(f, "bar low {low} exceeds high {high}")
            }
            ValidationError::NegativeVolume { value } => {
                write!(f, "bar volume must be non-negative, got {value}")
            }
            ValidationError::EmptySymbol => write!(f, "symbol must not be empty"),
        }
    }
}

impl Error for ValidationError {}
