use crate::error::Result;
use crate::models::IndicatorRecord;
use std::io::Write;

/// Header of the indicator export
pub const INDICATOR_HEADER: [&str; 14] = [
    "symbol",
    "date",
    "open",
    "high",
    "low",
    "close",
    "volume",
    "daily_return",
    "daily_range",
    "return_status",
    "cumulative_growth",
    "running_peak",
    "drawdown",
    "rolling_volatility",
];

/// Write indicator records as CSV, one row per day
///
/// # Returns
/// * Number of data rows written
pub fn write_indicator_csv<W: Write>(sink: W, records: &[IndicatorRecord]) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(sink);
    writer.write_record(INDICATOR_HEADER)?;

    for record in records {
        let p = &record.price;
        writer.write_record(&[
            p.symbol.clone(),
            p.date.to_string(),
            p.open.to_string(),
            p.high.to_string(),
            p.low.to_string(),
            p.close.to_string(),
            p.volume.to_string(),
            format!("{:.6}", record.daily_return),
            record.daily_range.to_string(),
            record.return_status.to_string(),
            format!("{:.8}", record.cumulative_growth),
            format!("{:.8}", record.running_peak),
            format!("{:.6}", record.drawdown),
            record
                .rolling_volatility
                .map_or(String::new(), |v| format!("{:.6}", v)),
        ])?;
    }

    writer.flush()?;
    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PriceRecord;
    use crate::services::indicator_engine::compute_indicators;
    use chrono::NaiveDate;

    #[test]
    fn test_write_indicator_csv() {
        let d1 = NaiveDate::from_ymd_opt(2021, 3, 1).unwrap();
        let d2 = NaiveDate::from_ymd_opt(2021, 3, 2).unwrap();
        let prices = vec![
            PriceRecord::new("ETH", d1, 10.0, 11.0, 9.0, 10.0, 100.0),
            PriceRecord::new("ETH", d2, 10.0, 12.0, 9.5, 11.0, 150.0),
        ];
        let indicators = compute_indicators(&prices);

        let mut buf = Vec::new();
        let written = write_indicator_csv(&mut buf, &indicators).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(written, 1);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("symbol,date,open"));
        assert!(lines[1].starts_with("ETH,2021-03-02,10,12,9.5,11,150,10.000000,2.5,positive"));
        assert!(lines[1].ends_with(",")); // no rolling volatility yet
    }
}
