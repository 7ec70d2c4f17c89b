//! CSV file data adapter.
//!
//! Reads `<base_path>/<TICKER>.csv` with the header
//! `date,open,high,low,close,volume`. Rows are returned in file order.

use crate::domain::error::StockSenseError;
use crate::domain::ohlcv::OhlcvBar;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

const EXPECTED_HEADER: [&str; 6] = ["date", "open", "high", "low", "close", "volume"];

pub struct CsvAdapter {
    base_path: PathBuf,
}

impl CsvAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn csv_path(&self, ticker: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", ticker))
    }
}

fn field<'r>(
    record: &'r csv::StringRecord,
    index: usize,
    name: &str,
    line: u64,
) -> Result<&'r str, StockSenseError> {
    record
        .get(index)
        .map(str::trim)
        .ok_or_else(|| StockSenseError::DataLoad {
            reason: format!("line {}: missing {} column", line, name),
        })
}

fn parse_field<T: FromStr>(
    record: &csv::StringRecord,
    index: usize,
    name: &str,
    line: u64,
) -> Result<T, StockSenseError>
where
    T::Err: std::fmt::Display,
{
    let raw = field(record, index, name, line)?;
    raw.parse().map_err(|e| StockSenseError::DataLoad {
        reason: format!("line {}: invalid {} value '{}': {}", line, name, raw, e),
    })
}

/// Columns are read by position, so the header must match exactly
/// (case and surrounding whitespace aside).
fn check_header(headers: &csv::StringRecord) -> Result<(), StockSenseError> {
    let matches = headers.len() == EXPECTED_HEADER.len()
        && headers
            .iter()
            .zip(EXPECTED_HEADER)
            .all(|(got, want)| got.trim().eq_ignore_ascii_case(want));
    if matches {
        return Ok(());
    }
    Err(StockSenseError::DataLoad {
        reason: format!(
            "unexpected header '{}', expected '{}'",
            headers.iter().collect::<Vec<_>>().join(","),
            EXPECTED_HEADER.join(",")
        ),
    })
}

/// Volume as a whole number; data vendors sometimes write `1200.0`.
fn parse_volume(record: &csv::StringRecord, line: u64) -> Result<u64, StockSenseError> {
    let raw = field(record, 5, "volume", line)?;
    if let Ok(v) = raw.parse::<u64>() {
        return Ok(v);
    }
    match raw.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u64::MAX as f64 => {
            Ok(v as u64)
        }
        _ => Err(StockSenseError::DataLoad {
            reason: format!("line {}: invalid volume value '{}'", line, raw),
        }),
    }
}

impl DataPort for CsvAdapter {
    fn load_bars(&self, ticker: &str) -> Result<Vec<OhlcvBar>, StockSenseError> {
        if ticker.is_empty() || ticker.contains(['/', '\\']) || ticker.starts_with('.') {
            return Err(StockSenseError::InvalidInput {
                reason: format!("invalid ticker '{}'", ticker),
            });
        }

        let path = self.csv_path(ticker);
        tracing::debug!(path = %path.display(), "reading price history");
        let content = fs::read_to_string(&path).map_err(|e| StockSenseError::DataLoad {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let headers = rdr.headers().map_err(|e| StockSenseError::DataLoad {
            reason: format!("CSV parse error: {}", e),
        })?;
        check_header(headers)?;
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| StockSenseError::DataLoad {
                reason: format!("CSV parse error: {}", e),
            })?;
            let line = record.position().map(|p| p.line()).unwrap_or(0);

            let date_str = field(&record, 0, "date", line)?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
                StockSenseError::DataLoad {
                    reason: format!("line {}: invalid date '{}': {}", line, date_str, e),
                }
            })?;

            bars.push(OhlcvBar {
                date,
                open: parse_field(&record, 1, "open", line)?,
                high: parse_field(&record, 2, "high", line)?,
                low: parse_field(&record, 3, "low", line)?,
                close: parse_field(&record, 4, "close", line)?,
                volume: parse_volume(&record, line)?,
            });
        }

        tracing::info!(ticker, bars = bars.len(), "price history loaded");
        Ok(bars)
    }
}
