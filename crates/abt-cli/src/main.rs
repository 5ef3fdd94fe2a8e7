mod csv_io;

use std::path::PathBuf;

use abt_backtest::{fee_schedule_from_config, initial_capital_from_config, BacktestDriver, InMemoryMarketData};
use abt_config::BacktestConfig;
use abt_evaluator::evaluate;
use abt_strategy::DualMovingAverageStrategy;
use anyhow::{Context, Result};
use chrono::{NaiveDate, TimeZone, Utc};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "abt")]
#[command(about = "A-share backtest engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a backtest over a universe of symbols.
    Run {
        /// Path to a YAML config document (defaults if omitted).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Directory containing one CSV file per symbol, named `<symbol>.csv`.
        #[arg(long, required = true)]
        bars_dir: PathBuf,

        /// Comma-separated symbol universe, e.g. "600000.SH,000001.SZ".
        #[arg(long, required = true, value_delimiter = ',')]
        symbols: Vec<String>,

        /// Inclusive start date, YYYY-MM-DD.
        #[arg(long)]
        start: String,

        /// Inclusive end date, YYYY-MM-DD.
        #[arg(long)]
        end: String,

        /// Optional path to write the trade log CSV.
        #[arg(long)]
        trade_log: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.cmd {
        Commands::Run { config, bars_dir, symbols, start, end, trade_log } => {
            run_backtest(config, bars_dir, symbols, &start, &end, trade_log)
        }
    }
}

fn run_backtest(
    config_path: Option<PathBuf>,
    bars_dir: PathBuf,
    symbols: Vec<String>,
    start: &str,
    end: &str,
    trade_log: Option<PathBuf>,
) -> Result<()> {
    let config = match config_path {
        Some(path) => BacktestConfig::load_yaml(&path)?,
        None => BacktestConfig::default(),
    };
    let fees = fee_schedule_from_config(&config);
    let initial_capital = initial_capital_from_config(&config);

    let start_date = NaiveDate::parse_from_str(start, "%Y-%m-%d").context("parse --start")?;
    let end_date = NaiveDate::parse_from_str(end, "%Y-%m-%d").context("parse --end")?;
    let clock = Utc.from_utc_datetime(&start_date.and_hms_opt(15, 0, 0).expect("valid time"));

    let mut market = InMemoryMarketData::new();
    for symbol in &symbols {
        let path = bars_dir.join(format!("{symbol}.csv"));
        let bars = csv_io::load_bars(&path, symbol)?;
        market = market.with_bars(symbol.clone(), bars);
    }

    let strategy = DualMovingAverageStrategy::new();
    let driver = BacktestDriver::new("backtest", market, strategy, fees, initial_capital, clock);
    let report = driver.run(&symbols, start_date, end_date)?;

    if let Some(path) = trade_log {
        csv_io::write_trade_log(&path, &report.trades)?;
    }

    let end_clock = Utc.from_utc_datetime(&end_date.and_hms_opt(15, 0, 0).expect("valid time"));
    let performance = evaluate(clock, end_clock, initial_capital, &report.snapshots, &report.trades);

    println!("Initial Capital:   {}", performance.initial_capital);
    println!("Final Capital:     {}", performance.final_capital);
    println!("Total Return:      {:.2}%", performance.total_return * 100.0);
    println!("Annualized Return: {:.2}%", performance.annualized_return * 100.0);
    println!("Max Drawdown:      {:.2}%", performance.max_drawdown * 100.0);
    println!("Win Rate:          {:.2}%", performance.win_rate * 100.0);
    println!("Total Trades:      {}", performance.trade_count);

    Ok(())
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();
}
