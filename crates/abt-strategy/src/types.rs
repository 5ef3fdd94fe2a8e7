use abt_types::ShareCount;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SignalDirection {
    Buy,
    Sell,
}

/// A trading signal emitted by a [`Strategy`](crate::Strategy). The driver
/// normalizes signals to orders (§4.7); `target_volume` is the strategy's
/// desired trade size before lot rounding.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    pub symbol: String,
    pub direction: SignalDirection,
    pub target_volume: ShareCount,
    pub confidence: f64,
    pub strategy_name: String,
    pub reason: String,
}

impl Signal {
    pub fn new(
        symbol: impl Into<String>,
        direction: SignalDirection,
        target_volume: ShareCount,
        strategy_name: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            direction,
            target_volume,
            confidence: 1.0,
            strategy_name: strategy_name.into(),
            reason: reason.into(),
        }
    }
}
