//! Outlier detection strategies
//!
//! The three strategies answer different questions and are kept separate:
//! range spikes only matter upwards, volume anomalies matter both ways, and
//! return shocks are measured in standard deviations.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutlierMethod {
    /// IQR on daily range, upper fence only
    ///
    /// Flags days whose high-low spread is unusually wide.
    #[serde(alias = "iqr", alias = "range")]
    IqrRange,

    /// IQR on volume, both fences
    #[serde(alias = "volume")]
    IqrVolume,

    /// Z-score on daily return, |z| > 2
    #[serde(rename = "zscore-return", alias = "zscore", alias = "z-score")]
    ZScoreReturn,
}

impl Default for OutlierMethod {
    fn default() -> Self {
        OutlierMethod::IqrRange
    }
}

impl OutlierMethod {
    /// Parse from string
    pub fn from_str(s: &str) -> Result<Self, String> {
        match s.to_lowercase().as_str() {
            "iqr-range" | "iqr" | "range" => Ok(OutlierMethod::IqrRange),
            "iqr-volume" | "volume" => Ok(OutlierMethod::IqrVolume),
            "zscore-return" | "zscore" | "z-score" => Ok(OutlierMethod::ZScoreReturn),
            _ => Err(format!(
                "Invalid outlier method: '{}'. Valid values: iqr-range, iqr-volume, zscore-return",
                s
            )),
        }
    }

    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            OutlierMethod::IqrRange => "iqr-range",
            OutlierMethod::IqrVolume => "iqr-volume",
            OutlierMethod::ZScoreReturn => "zscore-return",
        }
    }

    /// Name of the column the method scans
    pub fn column(&self) -> &'static str {
        match self {
            OutlierMethod::IqrRange => "daily_range",
            OutlierMethod::IqrVolume => "volume",
            OutlierMethod::ZScoreReturn => "daily_return",
        }
    }
}

impl fmt::Display for OutlierMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One flagged record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outlier {
    pub date: NaiveDate,
    /// Value of the scanned column
    pub value: f64,
    /// z-score for ZScoreReturn, distance past the breached fence for IQR
    pub score: f64,
}

/// Outlier scan result with the thresholds that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierSet {
    pub method: OutlierMethod,
    /// Lower threshold, None for one-sided scans
    pub lower_fence: Option<f64>,
    pub upper_fence: f64,
    pub outliers: Vec<Outlier>,
}

impl OutlierSet {
    pub fn empty(method: OutlierMethod) -> Self {
        Self {
            method,
            lower_fence: None,
            upper_fence: 0.0,
            outliers: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.outliers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outliers.is_empty()
    }
}
