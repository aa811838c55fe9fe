//! Calendar rollups: yearly returns and monthly seasonality

use crate::models::{IndicatorRecord, MonthlySeason, PriceRecord, YearlyReturn};
use std::collections::BTreeMap;

/// Close-to-close return per calendar year
///
/// Years with a single record are excluded, not zero-filled.
pub fn yearly_returns<'a, I>(records: I) -> Vec<YearlyReturn>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    // year -> (first_close, last_close, count); input is date-ordered
    let mut years: BTreeMap<i32, (f64, f64, usize)> = BTreeMap::new();
    for record in records {
        years
            .entry(record.year())
            .and_modify(|(_, last, count)| {
                *last = record.close;
                *count += 1;
            })
            .or_insert((record.close, record.close, 1));
    }

    years
        .into_iter()
        .filter(|(_, (_, _, count))| *count > 1)
        .map(|(year, (first_close, last_close, records))| YearlyReturn {
            year,
            first_close,
            last_close,
            return_pct: (last_close / first_close - 1.0) * 100.0,
            records,
        })
        .collect()
}

/// Mean daily return and mean volume by calendar month, pooled across years
pub fn monthly_seasonality(series: &[IndicatorRecord]) -> Vec<MonthlySeason> {
    // month -> (return_sum, volume_sum, count)
    let mut months: BTreeMap<u32, (f64, f64, usize)> = BTreeMap::new();
    for record in series {
        let entry = months.entry(record.price.month()).or_insert((0.0, 0.0, 0));
        entry.0 += record.daily_return;
        entry.1 += record.volume();
        entry.2 += 1;
    }

    months
        .into_iter()
        .map(|(month, (return_sum, volume_sum, records))| MonthlySeason {
            month,
            mean_return: return_sum / records as f64,
            mean_volume: volume_sum / records as f64,
            records,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::indicator_engine::compute_indicators;
    use chrono::NaiveDate;

    fn record(y: i32, m: u32, d: u32, close: f64, volume: f64) -> PriceRecord {
        let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
        PriceRecord::new("BTC", date, close, close, close, close, volume)
    }

    #[test]
    fn test_yearly_returns_skip_single_record_years() {
        let records = vec![
            record(2018, 1, 1, 100.0, 1.0),
            record(2018, 12, 31, 150.0, 1.0),
            record(2019, 1, 1, 200.0, 1.0),
        ];
        let yearly = yearly_returns(&records);

        assert_eq!(yearly.len(), 1);
        assert_eq!(yearly[0].year, 2018);
        assert!((yearly[0].return_pct - 50.0).abs() < 1e-9);
        assert_eq!(yearly[0].records, 2);
    }

    #[test]
    fn test_yearly_returns_use_first_and_last_close() {
        let records = vec![
            record(2020, 1, 1, 100.0, 1.0),
            record(2020, 6, 1, 300.0, 1.0),
            record(2020, 12, 31, 80.0, 1.0),
        ];
        let yearly = yearly_returns(&records);
        assert!((yearly[0].return_pct - (-20.0)).abs() < 1e-9);
    }

    #[test]
    fn test_monthly_seasonality_pools_years() {
        let prices = vec![
            record(2019, 12, 31, 100.0, 0.0),
            record(2020, 1, 1, 110.0, 10.0), // +10%
            record(2020, 2, 1, 110.0, 20.0), // 0%
            record(2021, 1, 1, 99.0, 30.0),  // -10%
        ];
        let seasons = monthly_seasonality(&compute_indicators(&prices));

        assert_eq!(seasons.len(), 2);
        assert_eq!(seasons[0].month, 1);
        assert_eq!(seasons[0].records, 2);
        assert!(seasons[0].mean_return.abs() < 1e-9);
        assert!((seasons[0].mean_volume - 20.0).abs() < 1e-9);
        assert_eq!(seasons[1].month, 2);
        assert!((seasons[1].mean_volume - 20.0).abs() < 1e-9);
    }
}
