//! abt-config
//!
//! A single-document, serde-backed configuration for the backtest engine
//! (§6 "Configuration"). Unlike a live-trading service's layered
//! per-environment override stack, a backtest run is a single process with
//! a single config document, so no multi-file merge/hash machinery is
//! needed here.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Recognized engine options (§6), each defaulting to the value given
/// there. `BacktestConfig::default()` agrees with parsing an empty YAML
/// document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BacktestConfig {
    pub initial_capital: f64,
    pub slippage_buy: f64,
    pub slippage_sell: f64,
    pub commission_rate: f64,
    pub min_commission: f64,
    pub transfer_fee_rate: f64,
    pub stamp_duty_rate: f64,
    pub capacity_limit_ratio: f64,
    pub lot_size: i64,
}

impl Default for BacktestConfig {
    fn default() -> Self {
        Self {
            initial_capital: 1_000_000.00,
            slippage_buy: 0.001,
            slippage_sell: 0.001,
            commission_rate: 0.00025,
            min_commission: 5.00,
            transfer_fee_rate: 0.00001,
            stamp_duty_rate: 0.0005,
            capacity_limit_ratio: 0.10,
            lot_size: 100,
        }
    }
}

impl BacktestConfig {
    /// Loads a config from a single YAML document on disk. Missing fields
    /// fall back to [`BacktestConfig::default`].
    pub fn load_yaml(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
        Self::from_yaml_str(&raw)
    }

    pub fn from_yaml_str(raw: &str) -> Result<Self> {
        serde_yaml::from_str(raw).context("parse backtest config yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_empty_document() {
        let from_empty: BacktestConfig = BacktestConfig::from_yaml_str("{}\n").unwrap();
        assert_eq!(from_empty, BacktestConfig::default());
    }

    #[test]
    fn partial_document_overrides_only_named_fields() {
        let cfg = BacktestConfig::from_yaml_str("initial_capital: 2000000.0\n").unwrap();
        assert_eq!(cfg.initial_capital, 2_000_000.0);
        assert_eq!(cfg.lot_size, BacktestConfig::default().lot_size);
    }
}
