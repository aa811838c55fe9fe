//! Analysis Constants
//!
//! Thresholds and column names shared by the loader, indicator engine and
//! aggregator.
//!
//! ## Drawdown Episodes
//!
//! An episode opens when drawdown falls below [`EPISODE_START_DRAWDOWN`]
//! and closes once it recovers to [`EPISODE_END_DRAWDOWN`] or better.
//! Both values are percentages (drawdown is always <= 0).

/// Required input columns, matched case-insensitively against the header
pub mod csv_column {
    pub const SYMBOL: &str = "symbol";
    pub const DATE: &str = "date";
    pub const OPEN: &str = "open";
    pub const HIGH: &str = "high";
    pub const LOW: &str = "low";
    pub const CLOSE: &str = "close";
    pub const VOLUME: &str = "volume";

    pub const ALL: [&str; 7] = [SYMBOL, DATE, OPEN, HIGH, LOW, CLOSE, VOLUME];
}

/// Accepted date layouts; any time component is discarded
pub const DATE_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d"];

/// Crypto markets trade every calendar day
pub const PERIODS_PER_YEAR: f64 = 365.0;

/// Trailing window (in records) for rolling return volatility
pub const VOLATILITY_WINDOW: usize = 30;

/// Drawdown (%) that opens a recovery episode
pub const EPISODE_START_DRAWDOWN: f64 = -5.0;

/// Drawdown (%) at or above which an open episode is considered recovered
pub const EPISODE_END_DRAWDOWN: f64 = -1.0;

/// Efficiency score reported when no drawdown episode was closed
pub const NEUTRAL_EFFICIENCY_SCORE: f64 = 50.0;

/// Fence multiplier for IQR outlier detection
pub const IQR_FENCE_MULTIPLIER: f64 = 1.5;

/// |z| above which a daily return is an outlier
pub const ZSCORE_THRESHOLD: f64 = 2.0;

/// Minimum spacing (in records) between annotated local peaks
pub const LOCAL_PEAK_MIN_SPACING: usize = 30;

/// Standard deviations below this are treated as zero variance
pub const ZERO_VARIANCE_EPSILON: f64 = 1e-10;

/// Minimum records for any windowed statistic to be meaningful
pub const MIN_RECORDS_FOR_ANALYSIS: usize = 2;

/// Default input file when neither `--data` nor `CRYPTO_DATA_FILE` is set
pub const DEFAULT_DATA_FILE: &str = "data/cryptocurrency.csv";
