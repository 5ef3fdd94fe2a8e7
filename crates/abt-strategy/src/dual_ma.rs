use std::collections::BTreeMap;

use abt_portfolio::PositionBook;
use abt_types::{Bar, DEFAULT_LOT_SIZE};

use crate::strategy::Strategy;
use crate::types::{Signal, SignalDirection};

const FAST_PERIOD: usize = 5;
const SLOW_PERIOD: usize = 10;
const MIN_BARS: usize = SLOW_PERIOD + 1;

/// Reference strategy (§4.8): a dual moving-average crossover. Emits a BUY
/// signal on a golden cross (fast MA crosses above slow MA) and a SELL
/// signal on a death cross (fast MA crosses below slow MA), provided a
/// sellable position exists.
#[derive(Default)]
pub struct DualMovingAverageStrategy;

impl DualMovingAverageStrategy {
    pub fn new() -> Self {
        Self
    }

    fn moving_average(closes: &[f64]) -> f64 {
        closes.iter().sum::<f64>() / closes.len() as f64
    }
}

impl Strategy for DualMovingAverageStrategy {
    fn name(&self) -> &str {
        "dual_moving_average"
    }

    fn generate_signals(
        &self,
        market_data: &BTreeMap<String, Vec<Bar>>,
        positions: &PositionBook,
    ) -> Vec<Signal> {
        let mut signals = Vec::new();

        for (symbol, bars) in market_data {
            if bars.len() < MIN_BARS {
                continue;
            }
            let closes: Vec<f64> = bars.iter().map(|b| b.close.to_f64()).collect();
            let n = closes.len();

            let ma5_curr = Self::moving_average(&closes[n - FAST_PERIOD..]);
            let ma10_curr = Self::moving_average(&closes[n - SLOW_PERIOD..]);
            let ma5_prev = Self::moving_average(&closes[n - FAST_PERIOD - 1..n - 1]);
            let ma10_prev = Self::moving_average(&closes[n - SLOW_PERIOD - 1..n - 1]);

            let golden_cross = ma5_prev <= ma10_prev && ma5_curr > ma10_curr;
            let death_cross = ma5_prev >= ma10_prev && ma5_curr < ma10_curr;

            if golden_cross {
                signals.push(Signal::new(
                    symbol.clone(),
                    SignalDirection::Buy,
                    DEFAULT_LOT_SIZE,
                    self.name(),
                    format!(
                        "Golden Cross: MA5({ma5_curr:.2}) > MA10({ma10_curr:.2})"
                    ),
                ));
            } else if death_cross {
                if let Some(position) = positions.get(symbol) {
                    if position.available_volume > 0 {
                        signals.push(Signal::new(
                            symbol.clone(),
                            SignalDirection::Sell,
                            position.available_volume,
                            self.name(),
                            format!(
                                "Death Cross: MA5({ma5_curr:.2}) < MA10({ma10_curr:.2})"
                            ),
                        ));
                    }
                }
            }
        }

        signals
    }
}
