mod indicator_record;
mod outlier;
mod price_record;
mod summary;
mod view_mode;
pub mod indicators;

pub use indicator_record::{IndicatorRecord, ReturnStatus};
pub use outlier::{Outlier, OutlierMethod, OutlierSet};
pub use price_record::PriceRecord;
pub use summary::{
    ColumnStats, DrawdownEpisode, MonthlySeason, PeakMark, RecoveryStats, SummaryOptions,
    SummaryStats, SummaryWarning, YearlyReturn,
};
pub use view_mode::ViewMode;

use std::collections::BTreeMap;

/// Ordered daily records for a single symbol
pub type TimeSeries = Vec<PriceRecord>;

/// Market data collection (symbol -> time series), iterated in symbol order
pub type MarketData = BTreeMap<String, TimeSeries>;
