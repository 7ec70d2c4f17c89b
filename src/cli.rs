//! CLI definition and dispatch.

use chrono::{Local, NaiveDate};
use clap::Parser;
use std::ffi::OsString;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::adapters::csv_adapter::CsvAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::text_report::TextReportAdapter;
use crate::domain::analysis::{self, AnalysisConfig};
use crate::domain::backtest::BacktestConfig;
use crate::domain::config_validation::validate_config;
use crate::domain::error::StockSenseError;
use crate::domain::indicator::IndicatorParams;
use crate::domain::metrics::ScoreWeights;
use crate::domain::price_series::PriceSeries;
use crate::domain::strategy::default_strategies;
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::ReportPort;

const DEFAULT_WINDOW: i64 = 20;
const DEFAULT_DATA_DIR: &str = ".";

/// Exit status for a rejected command line (sysexits EX_USAGE).
pub const USAGE_EXIT: u8 = 64;

#[derive(Parser, Debug)]
#[command(
    name = "stocksense",
    about = "Stock analytics and strategy backtester"
)]
pub struct Cli {
    /// Ticker symbol; prices are read from <data-dir>/<TICKER>.csv
    pub ticker: String,
    /// INI configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
    /// Directory holding the price CSV files (overrides [data] dir)
    #[arg(short, long)]
    pub data_dir: Option<PathBuf>,
    /// Analysis date (YYYY-MM-DD); selects the year-to-date year
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

/// Parse the command line. Help and version requests print and exit 0;
/// usage errors print and exit with [`USAGE_EXIT`].
pub fn parse_args<I, T>(args: I) -> Result<Cli, ExitCode>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args).map_err(|e| {
        let _ = e.print();
        usage_exit_code(&e)
    })
}

pub fn usage_exit_code(err: &clap::Error) -> ExitCode {
    if err.use_stderr() {
        ExitCode::from(USAGE_EXIT)
    } else {
        ExitCode::SUCCESS
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match run_cli(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_cli(cli: &Cli) -> Result<(), StockSenseError> {
    // Stage 1: Load and validate config
    let adapter = match &cli.config {
        Some(path) => load_config(path)?,
        None => FileConfigAdapter::empty(),
    };
    validate_config(&adapter)?;

    // Stage 2: Resolve data source
    let data_dir = resolve_data_dir(cli.data_dir.as_deref(), &adapter);
    let data_port = CsvAdapter::new(data_dir);
    let as_of = cli.as_of.unwrap_or_else(|| Local::now().date_naive());

    // Stages 3-6: load, analyse, render
    let report = run_pipeline(&data_port, &adapter, &cli.ticker, as_of)?;

    // Nothing reaches stdout unless the whole run succeeded
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(report.as_bytes())?;
    stdout.flush()?;
    Ok(())
}

pub fn load_config(path: &Path) -> Result<FileConfigAdapter, StockSenseError> {
    tracing::info!(path = %path.display(), "loading config");
    FileConfigAdapter::from_file(path).map_err(|e| StockSenseError::ConfigParse {
        file: path.display().to_string(),
        reason: e.to_string(),
    })
}

/// CLI flag first, then `[data] dir`, then the working directory.
pub fn resolve_data_dir(cli_dir: Option<&Path>, config: &dyn ConfigPort) -> PathBuf {
    match cli_dir {
        Some(dir) => dir.to_path_buf(),
        None => config
            .get_string("data", "dir")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
    }
}

/// Load the ticker, run every stage and return the rendered report.
pub fn run_pipeline(
    data_port: &dyn DataPort,
    config: &dyn ConfigPort,
    ticker: &str,
    as_of: NaiveDate,
) -> Result<String, StockSenseError> {
    let analysis_config = build_analysis_config(config, as_of)?;

    // Stage 3: Load price history
    let bars = data_port.load_bars(ticker)?;
    let series = PriceSeries::new(ticker, bars)?;
    tracing::info!(
        ticker,
        bars = series.len(),
        from = %series.bars()[0].date,
        to = %series.latest().date,
        "price series ready"
    );

    // Stages 4-5: Indicators, backtests, recommendation
    let strategies = default_strategies(&analysis_config.indicators);
    let report = analysis::analyze(&series, &strategies, &analysis_config)?;

    // Stage 6: Render
    Ok(TextReportAdapter::new().render(&report))
}

fn to_usize(section: &str, key: &str, value: i64) -> Result<usize, StockSenseError> {
    usize::try_from(value).map_err(|_| StockSenseError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: format!("{} must be non-negative", key),
    })
}

pub fn build_indicator_params(config: &dyn ConfigPort) -> Result<IndicatorParams, StockSenseError> {
    let window = to_usize(
        "analysis",
        "window",
        config.get_int("analysis", "window", DEFAULT_WINDOW),
    )?;
    let k = config.get_double("analysis", "bollinger_k", 2.0);
    let stddev_mult_x100 = (k * 100.0).round();
    if !(1.0..=u32::MAX as f64).contains(&stddev_mult_x100) {
        return Err(StockSenseError::ConfigInvalid {
            section: "analysis".into(),
            key: "bollinger_k".into(),
            reason: "bollinger_k must be at least 0.01".into(),
        });
    }

    Ok(IndicatorParams {
        window,
        stddev_mult_x100: stddev_mult_x100 as u32,
        risk_free_rate: config.get_double("analysis", "risk_free_rate", 0.0),
    })
}

pub fn build_backtest_config(
    config: &dyn ConfigPort,
    params: &IndicatorParams,
) -> Result<BacktestConfig, StockSenseError> {
    let default_warmup = params.window.max(DEFAULT_WINDOW as usize) as i64;
    let defaults = ScoreWeights::default();

    Ok(BacktestConfig {
        warmup: to_usize(
            "backtest",
            "warmup",
            config.get_int("backtest", "warmup", default_warmup),
        )?,
        lookback: to_usize(
            "backtest",
            "lookback",
            config.get_int("backtest", "lookback", 0),
        )?,
        risk_free_rate: params.risk_free_rate,
        weights: ScoreWeights {
            return_weight: config.get_double("score", "return_weight", defaults.return_weight),
            sharpe_weight: config.get_double("score", "sharpe_weight", defaults.sharpe_weight),
            win_rate_weight: config.get_double(
                "score",
                "win_rate_weight",
                defaults.win_rate_weight,
            ),
            drawdown_weight: config.get_double(
                "score",
                "drawdown_weight",
                defaults.drawdown_weight,
            ),
        },
    })
}

pub fn build_analysis_config(
    config: &dyn ConfigPort,
    as_of: NaiveDate,
) -> Result<AnalysisConfig, StockSenseError> {
    let indicators = build_indicator_params(config)?;
    let backtest = build_backtest_config(config, &indicators)?;
    Ok(AnalysisConfig {
        indicators,
        backtest,
        as_of,
    })
}
