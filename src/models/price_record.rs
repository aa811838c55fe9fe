use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Daily OHLCV (Open, High, Low, Close, Volume) record for one symbol
///
/// Records are validated once at load time: all magnitudes are finite and
/// non-negative, and `close` is strictly positive so a return against it is
/// always defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Coin symbol (BTC, ETH, ...)
    pub symbol: String,

    /// Trading day (day precision)
    pub date: NaiveDate,

    /// Opening price
    pub open: f64,

    /// Highest price
    pub high: f64,

    /// Lowest price
    pub low: f64,

    /// Closing price
    pub close: f64,

    /// Traded volume (fractional volumes are kept as-is)
    pub volume: f64,
}

impl PriceRecord {
    /// Create a new daily record
    pub fn new(
        symbol: impl Into<String>,
        date: NaiveDate,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            date,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Calendar year of the record
    pub fn year(&self) -> i32 {
        self.date.year()
    }

    /// Calendar month of the record (1-12)
    pub fn month(&self) -> u32 {
        self.date.month()
    }

    /// Day of month of the record (1-31)
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    /// Intraday range: high - low
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_fields() {
        let date = NaiveDate::from_ymd_opt(2015, 8, 7).unwrap();
        let record = PriceRecord::new("ETH", date, 2.83, 3.53, 2.52, 2.77, 164329.0);

        assert_eq!(record.year(), 2015);
        assert_eq!(record.month(), 8);
        assert_eq!(record.day(), 7);
        assert!((record.range() - 1.01).abs() < 1e-9);
    }
}
