use abt_backtest::{BacktestDriver, InMemoryMarketData};
use abt_execution::FeeSchedule;
use abt_strategy::DualMovingAverageStrategy;
use abt_types::{Bar, Money, Timeframe};
use chrono::{NaiveDate, TimeZone, Utc};

fn bar_for(symbol: &str, date: NaiveDate, close: f64, volume: i64) -> Bar {
    let ts = Utc.from_utc_datetime(&date.and_hms_opt(15, 0, 0).unwrap());
    Bar::new(
        symbol,
        Timeframe::OneDay,
        ts,
        Money::from_f64(close),
        Money::from_f64(close),
        Money::from_f64(close),
        Money::from_f64(close),
        volume,
    )
    .unwrap()
}

// End-to-end: a golden cross on day 11 should produce a BUY fill and a
// daily snapshot sequence that tracks the strategy's decisions.
#[test]
fn golden_cross_drives_a_buy_through_the_full_pipeline() {
    let symbol = "600000.SH".to_string();
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();

    let mut bars = Vec::new();
    for i in 0..10 {
        bars.push(bar_for(&symbol, start + chrono::Duration::days(i), 10.0, 10_000));
    }
    bars.push(bar_for(&symbol, start + chrono::Duration::days(10), 20.0, 10_000));
    bars.push(bar_for(&symbol, start + chrono::Duration::days(11), 20.0, 10_000));

    let market = InMemoryMarketData::new().with_bars(symbol.clone(), bars);
    let strategy = DualMovingAverageStrategy::new();
    let driver = BacktestDriver::new(
        "acct-1",
        market,
        strategy,
        FeeSchedule::default(),
        Money::from_f64(1_000_000.0),
        Utc.from_utc_datetime(&start.and_hms_opt(15, 0, 0).unwrap()),
    );

    let end = start + chrono::Duration::days(11);
    let report = driver.run(&[symbol.clone()], start, end).unwrap();

    assert_eq!(report.snapshots.len(), 12);
    assert!(!report.trades.is_empty());
    assert_eq!(report.trades[0].symbol, symbol);
}

#[test]
fn empty_universe_is_rejected() {
    let market = InMemoryMarketData::new();
    let strategy = DualMovingAverageStrategy::new();
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    let driver = BacktestDriver::new(
        "acct-1",
        market,
        strategy,
        FeeSchedule::default(),
        Money::from_f64(1_000_000.0),
        Utc.from_utc_datetime(&start.and_hms_opt(15, 0, 0).unwrap()),
    );
    let err = driver.run(&[], start, start).unwrap_err();
    assert!(matches!(err, abt_backtest::BacktestError::EmptyUniverse));
}
