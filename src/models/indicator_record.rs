use super::PriceRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Direction of a daily return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnStatus {
    Positive,
    Negative,
    /// Exactly zero or undefined return
    Neutral,
}

impl ReturnStatus {
    /// Classify a daily return; undefined and exact zero are both Neutral
    pub fn classify(daily_return: Option<f64>) -> Self {
        match daily_return {
            Some(r) if r > 0.0 => ReturnStatus::Positive,
            Some(r) if r < 0.0 => ReturnStatus::Negative,
            _ => ReturnStatus::Neutral,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnStatus::Positive => "positive",
            ReturnStatus::Negative => "negative",
            ReturnStatus::Neutral => "neutral",
        }
    }
}

impl fmt::Display for ReturnStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Price record extended with derived per-row indicators
///
/// # Units
/// - `daily_return`, `drawdown` and `rolling_volatility` are percentages
///   (2.5 means +2.5%)
/// - `cumulative_growth` and `running_peak` are growth multiples seeded at
///   1.0 just before the first retained record
///
/// The first record of every symbol has no defined return and is never
/// represented by an `IndicatorRecord`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorRecord {
    /// Underlying daily record
    #[serde(flatten)]
    pub price: PriceRecord,

    /// Close-to-close change vs the previous day: (close / prev_close - 1) * 100
    pub daily_return: f64,

    /// high - low
    pub daily_range: f64,

    pub return_status: ReturnStatus,

    /// Running product of (1 + daily_return / 100)
    pub cumulative_growth: f64,

    /// Running maximum of cumulative_growth, inclusive of this record
    pub running_peak: f64,

    /// (cumulative_growth / running_peak - 1) * 100, always <= 0
    pub drawdown: f64,

    /// Sample std of daily_return over the trailing window
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rolling_volatility: Option<f64>,
}

impl IndicatorRecord {
    pub fn symbol(&self) -> &str {
        &self.price.symbol
    }

    pub fn close(&self) -> f64 {
        self.price.close
    }

    pub fn volume(&self) -> f64 {
        self.price.volume
    }
}
