//! Plain-text report adapter implementing ReportPort.
//!
//! The layout is consumed by the dashboard's line parser, so label text,
//! line order and blank lines must not change. Numbers print with four
//! decimals; unavailable values print `N/A`.

use std::fmt::Write;

use crate::domain::analysis::AnalysisReport;
use crate::domain::metrics::StrategyResult;
use crate::ports::report_port::ReportPort;

pub const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, Copy, Default)]
pub struct TextReportAdapter;

impl TextReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

/// Below this magnitude a value prints as zero at four decimals.
const PRINTED_ZERO: f64 = 5e-5;

/// Maps values that would print as `-0.0000` to a plain zero.
fn settle(value: f64) -> f64 {
    if value.abs() < PRINTED_ZERO { 0.0 } else { value }
}

fn num(value: f64) -> String {
    if value.is_finite() {
        format!("{:.4}", settle(value))
    } else {
        NOT_AVAILABLE.to_string()
    }
}

fn opt(value: Option<f64>) -> String {
    value.map(num).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Percent values get a trailing `%`; `N/A` does not.
fn opt_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.4}%", settle(v)),
        _ => NOT_AVAILABLE.to_string(),
    }
}

fn lag_label(lag: usize) -> String {
    match lag {
        1 => "Lag-1 (daily)".to_string(),
        5 => "Lag-5 (weekly)".to_string(),
        20 => "Lag-20 (monthly)".to_string(),
        n => format!("Lag-{}", n),
    }
}

fn write_strategy(out: &mut String, result: &StrategyResult) {
    let _ = writeln!(out, "{} Strategy:", result.name);
    let _ = writeln!(out, "  Total Return: {}", opt_pct(Some(result.total_return_pct)));
    let _ = writeln!(out, "  Sharpe Ratio: {}", num(result.sharpe));
    let _ = writeln!(out, "  Max Drawdown: {}", opt_pct(Some(result.max_drawdown_pct)));
    let _ = writeln!(out, "  Win Rate: {}", opt_pct(Some(result.win_rate_pct)));
    let _ = writeln!(out, "  Overall Score: {}", num(result.score));
}

pub fn render_report(report: &AnalysisReport) -> String {
    let mut out = String::new();

    // Summary statistics
    let _ = writeln!(out, "Latest date: {}", report.latest_date.format("%Y-%m-%d"));
    let _ = writeln!(out, "Latest close: {}", num(report.latest_close));
    let _ = writeln!(out, "20-day SMA: {}", opt(report.sma));
    let _ = writeln!(out, "20-day volatility: {}", opt(report.volatility));
    let _ = writeln!(out, "Mean: {}", opt(report.mean_return));
    let _ = writeln!(out, "Sharpe Ratio (daily): {}", opt(report.sharpe));
    let _ = writeln!(out, "Year-to-date performance: {}", opt_pct(report.ytd_pct));
    let _ = writeln!(out, "Max drawdown: {}", opt_pct(report.max_drawdown_pct));
    out.push('\n');

    // Bollinger Bands
    let bands = report.bands;
    let _ = writeln!(out, "Middle (SMA): {}", opt(bands.map(|b| b.middle)));
    let _ = writeln!(out, "Upper band: {}", opt(bands.map(|b| b.upper)));
    let _ = writeln!(out, "Lower band: {}", opt(bands.map(|b| b.lower)));
    let status = report
        .band_status()
        .map(|s| s.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let _ = writeln!(out, "Status: {}", status);
    out.push('\n');

    let _ = writeln!(out, "Hurst Exponent: {}", opt(report.hurst));
    let _ = writeln!(out, "Behavior: {}", report.hurst_behavior());
    out.push('\n');

    for (lag, value) in &report.autocorrelation {
        let _ = writeln!(out, "{}: {}", lag_label(*lag), opt(*value));
    }
    out.push('\n');

    for result in &report.strategies {
        write_strategy(&mut out, result);
        out.push('\n');
    }

    let rec = &report.recommendation;
    let _ = writeln!(out, "RECOMMENDED STRATEGY: {}", rec.strategy_name);
    let _ = writeln!(
        out,
        "Current Signal Strength: {}",
        num(rec.current_signal_strength)
    );
    let _ = writeln!(out, "Action Recommendation: {}", rec.action);

    out
}

impl ReportPort for TextReportAdapter {
    fn render(&self, report: &AnalysisReport) -> String {
        render_report(report)
    }
}
