use super::{OutlierMethod, OutlierSet};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Knobs for a single `summarize` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryOptions {
    /// Outlier strategy reported in `SummaryStats::outliers`
    pub outlier_method: OutlierMethod,

    /// Annualization factor for return and volatility
    pub periods_per_year: f64,

    /// Minimum spacing between annotated local peaks
    pub local_peak_spacing: usize,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            outlier_method: OutlierMethod::default(),
            periods_per_year: crate::constants::PERIODS_PER_YEAR,
            local_peak_spacing: crate::constants::LOCAL_PEAK_MIN_SPACING,
        }
    }
}

/// Non-fatal conditions surfaced next to the statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SummaryWarning {
    /// Fewer than two records in the window; statistics are sentinels
    InsufficientData { records: usize },
}

impl fmt::Display for SummaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SummaryWarning::InsufficientData { records } => {
                write!(f, "insufficient data: {} record(s) in window", records)
            }
        }
    }
}

/// Central tendency and spread of one column
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStats {
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation
    pub std: f64,
}

/// A closed drawdown episode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawdownEpisode {
    pub start_index: usize,
    pub end_index: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Deepest drawdown (%) reached inside the episode
    pub trough: f64,
}

impl DrawdownEpisode {
    /// Recovery length in rows (trading days)
    pub fn length(&self) -> usize {
        self.end_index - self.start_index
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryStats {
    pub episodes: Vec<DrawdownEpisode>,
    /// Episode lengths in rows, in date order
    pub recovery_times: Vec<usize>,
    /// 0-100, higher is faster recovery; 50 when no episode closed
    pub efficiency_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyReturn {
    pub year: i32,
    pub first_close: f64,
    pub last_close: f64,
    /// (last_close / first_close - 1) * 100
    pub return_pct: f64,
    pub records: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySeason {
    /// Calendar month 1-12
    pub month: u32,
    pub mean_return: f64,
    pub mean_volume: f64,
    pub records: usize,
}

/// A marked price peak (all-time high or local peak)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeakMark {
    pub index: usize,
    pub date: NaiveDate,
    pub close: f64,
}

/// Per-symbol statistics for one selected window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    pub symbol: String,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub records: usize,

    pub close: ColumnStats,
    pub volume: ColumnStats,

    pub mean_daily_return: f64,
    pub annualized_return: f64,
    pub annualized_volatility: f64,
    pub sharpe_ratio: f64,

    /// abs(min(drawdown)), percent
    pub max_drawdown: f64,
    /// mean(drawdown), percent (<= 0)
    pub mean_drawdown: f64,
    pub recovery: RecoveryStats,

    pub outliers: OutlierSet,

    pub yearly_returns: Vec<YearlyReturn>,
    pub monthly_seasonality: Vec<MonthlySeason>,

    pub all_time_highs: Vec<PeakMark>,
    pub local_peaks: Vec<PeakMark>,

    /// Pearson correlation of volume against daily return
    pub volume_return_correlation: f64,

    pub warnings: Vec<SummaryWarning>,
}

impl SummaryStats {
    /// Year with the largest yearly return, if any year qualified
    pub fn best_year(&self) -> Option<&YearlyReturn> {
        self.yearly_returns
            .iter()
            .max_by(|a, b| a.return_pct.total_cmp(&b.return_pct))
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_episode_length() {
        let episode = DrawdownEpisode {
            start_index: 1,
            end_index: 4,
            start_date: NaiveDate::from_ymd_opt(2020, 3, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2020, 3, 4).unwrap(),
            trough: -7.0,
        };
        assert_eq!(episode.length(), 3);
    }

    #[test]
    fn test_options_deserialize_with_defaults() {
        let options: SummaryOptions = serde_json::from_str(r#"{"outlier_method": "iqr-volume"}"#).unwrap();
        assert_eq!(options.outlier_method, OutlierMethod::IqrVolume);
        assert_eq!(options.periods_per_year, 365.0);
        assert_eq!(options.local_peak_spacing, 30);
    }

    #[test]
    fn test_warning_display() {
        let warning = SummaryWarning::InsufficientData { records: 1 };
        assert_eq!(warning.to_string(), "insufficient data: 1 record(s) in window");
    }
}
