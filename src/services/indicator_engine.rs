//! Indicator Engine
//!
//! Derives per-row indicators from one symbol's ordered series. Every
//! computation is scoped to a single symbol: returns are never taken across
//! a symbol boundary, so a mixed table must go through
//! [`compute_indicators_grouped`].

use crate::constants::VOLATILITY_WINDOW;
use crate::models::indicators::{calculate_pct_change, calculate_rolling_std};
use crate::models::{IndicatorRecord, PriceRecord, ReturnStatus};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// Compute indicators for one symbol's date-ordered series
///
/// The first record has no prior close and is dropped; the output has
/// `series.len() - 1` records (or none for fewer than two inputs).
pub fn compute_indicators(series: &[PriceRecord]) -> Vec<IndicatorRecord> {
    if series.len() < 2 {
        return vec![];
    }

    debug_assert!(
        series.windows(2).all(|w| w[0].symbol == w[1].symbol),
        "compute_indicators called with a mixed-symbol series"
    );

    let returns: Vec<f64> = series
        .windows(2)
        .map(|w| match calculate_pct_change(w[1].close, w[0].close) {
            Some(r) => r,
            None => {
                // Loader rejects zero closes, so this only fires on hand-built input
                warn!(
                    symbol = %w[1].symbol,
                    date = %w[1].date,
                    "Undefined daily return mid-series"
                );
                f64::NAN
            }
        })
        .collect();
    let volatility = calculate_rolling_std(&returns, VOLATILITY_WINDOW);

    let mut cumulative_growth = 1.0;
    let mut running_peak = f64::MIN;
    let mut output = Vec::with_capacity(returns.len());

    for (i, record) in series.iter().skip(1).enumerate() {
        let daily_return = returns[i];

        cumulative_growth *= 1.0 + daily_return / 100.0;
        running_peak = running_peak.max(cumulative_growth);
        let drawdown = (cumulative_growth / running_peak - 1.0) * 100.0;

        output.push(IndicatorRecord {
            price: record.clone(),
            daily_return,
            daily_range: record.range(),
            return_status: ReturnStatus::classify(daily_return.is_finite().then_some(daily_return)),
            cumulative_growth,
            running_peak,
            drawdown,
            rolling_volatility: volatility[i],
        });
    }

    debug!(
        symbol = %series[0].symbol,
        input = series.len(),
        output = output.len(),
        "Computed indicators"
    );
    output
}

/// Compute indicators for a flat multi-symbol table
///
/// Rows are grouped by symbol and ordered by date inside each group before
/// any return is taken.
pub fn compute_indicators_grouped(records: &[PriceRecord]) -> BTreeMap<String, Vec<IndicatorRecord>> {
    let mut groups: BTreeMap<&str, Vec<PriceRecord>> = BTreeMap::new();
    for record in records {
        groups.entry(record.symbol.as_str()).or_default().push(record.clone());
    }

    groups
        .into_iter()
        .map(|(symbol, mut series)| {
            series.sort_by_key(|r| r.date);
            (symbol.to_string(), compute_indicators(&series))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn series(symbol: &str, closes: &[f64]) -> Vec<PriceRecord> {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = start + chrono::Duration::days(i as i64);
                PriceRecord::new(symbol, date, c, c * 1.1, c * 0.9, c, 1000.0 + i as f64)
            })
            .collect()
    }

    #[test]
    fn test_first_record_is_dropped() {
        let input = series("BTC", &[100.0, 110.0, 99.0]);
        let output = compute_indicators(&input);

        assert_eq!(output.len(), 2);
        assert_eq!(output[0].price.date, input[1].date);
        assert!((output[0].daily_return - 10.0).abs() < 1e-9);
        assert!((output[1].daily_return - (-10.0)).abs() < 1e-9);
    }

    #[test]
    fn test_short_series_yields_nothing() {
        assert!(compute_indicators(&[]).is_empty());
        assert!(compute_indicators(&series("BTC", &[100.0])).is_empty());
    }

    #[test]
    fn test_growth_peak_and_drawdown() {
        let output = compute_indicators(&series("BTC", &[100.0, 110.0, 99.0, 121.0]));

        assert!((output[0].cumulative_growth - 1.1).abs() < 1e-9);
        assert!((output[1].cumulative_growth - 0.99).abs() < 1e-9);
        assert!((output[2].cumulative_growth - 1.21).abs() < 1e-9);

        assert!((output[1].running_peak - 1.1).abs() < 1e-9);
        assert!((output[1].drawdown - (-10.0)).abs() < 1e-9);
        assert_eq!(output[2].drawdown, 0.0);
    }

    #[test]
    fn test_drawdown_never_positive_and_peak_non_decreasing() {
        let closes = [100.0, 95.0, 130.0, 80.0, 81.0, 200.0, 150.0, 150.0, 10.0, 400.0];
        let output = compute_indicators(&series("ETH", &closes));

        assert!(output.iter().all(|r| r.drawdown <= 0.0));
        assert!(output.windows(2).all(|w| w[1].running_peak >= w[0].running_peak));
    }

    #[test]
    fn test_return_status_and_range() {
        let output = compute_indicators(&series("BTC", &[100.0, 100.0, 101.0, 100.0]));

        assert_eq!(output[0].return_status, ReturnStatus::Neutral);
        assert_eq!(output[1].return_status, ReturnStatus::Positive);
        assert_eq!(output[2].return_status, ReturnStatus::Negative);
        assert!((output[0].daily_range - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_rolling_volatility_needs_full_window() {
        let closes: Vec<f64> = (0..40).map(|i| 100.0 + (i % 3) as f64).collect();
        let output = compute_indicators(&series("BTC", &closes));

        assert!(output[VOLATILITY_WINDOW - 2].rolling_volatility.is_none());
        assert!(output[VOLATILITY_WINDOW - 1].rolling_volatility.is_some());
    }

    #[test]
    fn test_deterministic() {
        let input = series("BTC", &[100.0, 103.0, 97.5, 120.0, 118.0]);
        assert_eq!(compute_indicators(&input), compute_indicators(&input));
    }

    #[test]
    fn test_grouped_matches_isolated_no_cross_symbol_leakage() {
        let btc = series("BTC", &[100.0, 110.0, 121.0, 90.0]);
        let eth = series("ETH", &[2.0, 1.0, 4.0]);

        // Interleave so that a flat pct-change would mix symbols
        let mut flat = Vec::new();
        for i in 0..btc.len().max(eth.len()) {
            if let Some(r) = eth.get(i) {
                flat.push(r.clone());
            }
            if let Some(r) = btc.get(i) {
                flat.push(r.clone());
            }
        }

        let grouped = compute_indicators_grouped(&flat);
        assert_eq!(grouped["BTC"], compute_indicators(&btc));
        assert_eq!(grouped["ETH"], compute_indicators(&eth));

        // First ETH return is 2 -> 1, not BTC's 100 -> 1
        assert!((grouped["ETH"][0].daily_return - (-50.0)).abs() < 1e-9);
    }
}
