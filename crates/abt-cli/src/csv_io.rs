use std::path::Path;

use abt_execution::TradeRecord;
use abt_types::{Bar, Money, Timeframe};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

#[derive(serde::Deserialize)]
struct BarRow {
    timestamp: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: i64,
}

/// Loads a symbol's bar history from a CSV file with columns
/// `timestamp,open,high,low,close,volume`.
pub fn load_bars(path: impl AsRef<Path>, symbol: &str) -> Result<Vec<Bar>> {
    let path = path.as_ref();
    let mut reader = csv::Reader::from_path(path).with_context(|| format!("open bars csv: {}", path.display()))?;
    let mut bars = Vec::new();
    for row in reader.deserialize() {
        let row: BarRow = row.with_context(|| format!("parse bar row in {}", path.display()))?;
        let bar = Bar::new(
            symbol,
            Timeframe::OneDay,
            row.timestamp,
            Money::from_f64(row.open),
            Money::from_f64(row.high),
            Money::from_f64(row.low),
            Money::from_f64(row.close),
            row.volume,
        )
        .map_err(|e| anyhow::anyhow!("invalid bar for {symbol}: {e}"))?;
        bars.push(bar);
    }
    Ok(bars)
}

/// Writes the trade log to CSV (§6 "Persisted trade log").
pub fn write_trade_log(path: impl AsRef<Path>, trades: &[TradeRecord]) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("create trade log: {}", path.display()))?;
    writer.write_record([
        "executed_at",
        "symbol",
        "direction",
        "price",
        "volume",
        "fees_total",
        "realized_pnl",
        "remark",
    ])?;
    for trade in trades {
        writer.write_record([
            trade.executed_at.to_rfc3339(),
            trade.symbol.clone(),
            trade.direction.to_string(),
            trade.price.to_string(),
            trade.volume.to_string(),
            trade.fees_total.to_string(),
            trade.realized_pnl.to_string(),
            trade.remark.clone(),
        ])?;
    }
    writer.flush().context("flush trade log")?;
    Ok(())
}
