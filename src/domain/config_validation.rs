//! Configuration validation.
//!
//! Validates every optional key before the analysis runs. A key that is
//! present must parse and be in range; absent keys fall back to defaults.

use crate::domain::error::StockSenseError;
use crate::ports::config_port::ConfigPort;

const DEFAULT_WINDOW: i64 = 20;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), StockSenseError> {
    validate_data_dir(config)?;
    let window = validate_window(config)?;
    validate_bollinger_k(config)?;
    validate_risk_free_rate(config)?;
    validate_warmup(config, window)?;
    validate_lookback(config)?;
    validate_score_weights(config)?;
    Ok(())
}

fn invalid(section: &str, key: &str, reason: impl Into<String>) -> StockSenseError {
    StockSenseError::ConfigInvalid {
        section: section.to_string(),
        key: key.to_string(),
        reason: reason.into(),
    }
}

fn parse_int(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<i64>, StockSenseError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|_| invalid(section, key, format!("expected an integer, got '{}'", s))),
    }
}

fn parse_double(
    config: &dyn ConfigPort,
    section: &str,
    key: &str,
) -> Result<Option<f64>, StockSenseError> {
    match config.get_string(section, key) {
        None => Ok(None),
        Some(s) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Some(v)),
            _ => Err(invalid(section, key, format!("expected a number, got '{}'", s))),
        },
    }
}

fn validate_data_dir(config: &dyn ConfigPort) -> Result<(), StockSenseError> {
    match config.get_string("data", "dir") {
        Some(s) if s.trim().is_empty() => Err(invalid("data", "dir", "dir must not be empty")),
        _ => Ok(()),
    }
}

fn validate_window(config: &dyn ConfigPort) -> Result<i64, StockSenseError> {
    let window = parse_int(config, "analysis", "window")?.unwrap_or(DEFAULT_WINDOW);
    if window < 2 {
        return Err(invalid("analysis", "window", "window must be at least 2"));
    }
    Ok(window)
}

fn validate_bollinger_k(config: &dyn ConfigPort) -> Result<(), StockSenseError> {
    if let Some(k) = parse_double(config, "analysis", "bollinger_k")? {
        if k <= 0.0 {
            return Err(invalid("analysis", "bollinger_k", "bollinger_k must be positive"));
        }
    }
    Ok(())
}

fn validate_risk_free_rate(config: &dyn ConfigPort) -> Result<(), StockSenseError> {
    if let Some(rate) = parse_double(config, "analysis", "risk_free_rate")? {
        if !(0.0..1.0).contains(&rate) {
            return Err(invalid(
                "analysis",
                "risk_free_rate",
                "risk_free_rate must be between 0 and 1",
            ));
        }
    }
    Ok(())
}

fn validate_warmup(config: &dyn ConfigPort, window: i64) -> Result<(), StockSenseError> {
    if let Some(warmup) = parse_int(config, "backtest", "warmup")? {
        if warmup < window {
            return Err(invalid(
                "backtest",
                "warmup",
                format!("warmup must be at least the analysis window ({})", window),
            ));
        }
    }
    Ok(())
}

fn validate_lookback(config: &dyn ConfigPort) -> Result<(), StockSenseError> {
    if let Some(lookback) = parse_int(config, "backtest", "lookback")? {
        if lookback < 0 {
            return Err(invalid("backtest", "lookback", "lookback must be non-negative"));
        }
    }
    Ok(())
}

fn validate_score_weights(config: &dyn ConfigPort) -> Result<(), StockSenseError> {
    for key in [
        "return_weight",
        "sharpe_weight",
        "win_rate_weight",
        "drawdown_weight",
    ] {
        if let Some(weight) = parse_double(config, "score", key)? {
            if weight < 0.0 {
                return Err(invalid("score", key, format!("{} must be non-negative", key)));
            }
        }
    }
    Ok(())
}
