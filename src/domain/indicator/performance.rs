//! Period performance: year-to-date return and maximum drawdown.

use chrono::Datelike;

use crate::domain::ohlcv::OhlcvBar;

/// (latest close / close on the first trading day of `year` - 1) * 100.
///
/// `None` when the history has no bar in `year` or ends before it.
pub fn calculate_ytd(bars: &[OhlcvBar], year: i32) -> Option<f64> {
    let latest = bars.last()?;
    if latest.date.year() != year {
        tracing::debug!(year, latest = %latest.date, "series does not reach the requested year");
        return None;
    }
    let first = bars.iter().find(|b| b.date.year() == year)?;
    Some((latest.close / first.close - 1.0) * 100.0)
}

/// Worst peak-to-trough decline as a signed fraction (<= 0).
///
/// Tracks the running peak P; drawdown[i] = (v[i] - P) / P.
pub fn calculate_max_drawdown(values: &[f64]) -> f64 {
    let Some(&first) = values.first() else {
        return 0.0;
    };

    let mut peak = first;
    let mut max_dd = 0.0_f64;

    for &value in values {
        if value > peak {
            peak = value;
        }
        if peak > 0.0 {
            let dd = (value - peak) / peak;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;

    fn bar(date: &str, close: f64) -> OhlcvBar {
        OhlcvBar {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000,
        }
    }

    #[test]
    fn ytd_from_first_trading_day() {
        let bars = vec![
            bar("2024-12-30", 90.0),
            bar("2024-12-31", 95.0),
            bar("2025-01-02", 100.0),
            bar("2025-01-03", 104.0),
            bar("2025-03-03", 110.0),
        ];
        let ytd = calculate_ytd(&bars, 2025).unwrap();
        assert!((ytd - 10.0).abs() < 1e-9);
    }

    #[test]
    fn ytd_missing_year() {
        let bars = vec![bar("2024-12-30", 90.0), bar("2024-12-31", 95.0)];
        assert_eq!(calculate_ytd(&bars, 2025), None);
    }

    #[test]
    fn ytd_series_ends_before_year() {
        let bars = vec![bar("2025-01-02", 90.0), bar("2025-06-30", 95.0)];
        assert_eq!(calculate_ytd(&bars, 2026), None);
    }

    #[test]
    fn ytd_single_bar_in_year_is_zero() {
        let bars = vec![bar("2024-12-31", 95.0), bar("2025-01-02", 100.0)];
        assert!(calculate_ytd(&bars, 2025).unwrap().abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_known_values() {
        let values = [100.0, 110.0, 90.0, 95.0, 80.0, 100.0];
        let dd = calculate_max_drawdown(&values);
        assert!((dd - (80.0 - 110.0) / 110.0).abs() < 1e-12);
    }

    #[test]
    fn max_drawdown_monotonic_is_zero() {
        let values: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        assert_eq!(calculate_max_drawdown(&values), 0.0);
    }

    #[test]
    fn max_drawdown_empty_is_zero() {
        assert_eq!(calculate_max_drawdown(&[]), 0.0);
    }

    proptest! {
        #[test]
        fn max_drawdown_is_bounded(
            values in prop::collection::vec(0.01f64..1_000.0, 1..100),
        ) {
            let dd = calculate_max_drawdown(&values);
            prop_assert!(dd <= 0.0);
            prop_assert!(dd > -1.0);
        }

        #[test]
        fn max_drawdown_zero_for_non_decreasing(
            mut values in prop::collection::vec(0.01f64..1_000.0, 1..100),
        ) {
            values.sort_by(f64::total_cmp);
            prop_assert_eq!(calculate_max_drawdown(&values), 0.0);
        }
    }
}
