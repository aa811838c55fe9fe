use crate::constants::MIN_RECORDS_FOR_ANALYSIS;
use crate::models::indicators::{is_zero_variance, mean, median, pearson_correlation, sample_std};
use crate::models::{ColumnStats, IndicatorRecord, SummaryOptions, SummaryStats, SummaryWarning};
use crate::services::{calendar, outliers, peaks, recovery};
use tracing::{debug, warn};

/// Reduces an indicator series into summary statistics
pub struct Aggregator;

impl Aggregator {
    /// Summarize one symbol's indicator series for the selected window
    ///
    /// Never fails: degenerate windows produce sentinel values (0, 50, empty
    /// sets) and an `InsufficientData` warning.
    pub fn summarize(symbol: &str, series: &[IndicatorRecord], options: &SummaryOptions) -> SummaryStats {
        let symbol = symbol.to_string();

        let mut warnings = Vec::new();
        if series.len() < MIN_RECORDS_FOR_ANALYSIS {
            warn!(%symbol, records = series.len(), "Insufficient data for summary statistics");
            warnings.push(SummaryWarning::InsufficientData {
                records: series.len(),
            });
        }

        let closes: Vec<f64> = series.iter().map(|r| r.close()).collect();
        let volumes: Vec<f64> = series.iter().map(|r| r.volume()).collect();
        let returns: Vec<f64> = series.iter().map(|r| r.daily_return).collect();
        let drawdowns: Vec<f64> = series.iter().map(|r| r.drawdown).collect();

        let enough = series.len() >= MIN_RECORDS_FOR_ANALYSIS;
        let prices = series.iter().map(|r| &r.price);

        let stats = SummaryStats {
            symbol,
            start: series.first().map(|r| r.price.date),
            end: series.last().map(|r| r.price.date),
            records: series.len(),
            close: Self::column_stats(&closes),
            volume: Self::column_stats(&volumes),
            mean_daily_return: mean(&returns),
            annualized_return: Self::annualized_return(&returns, options.periods_per_year),
            annualized_volatility: Self::annualized_volatility(&returns, options.periods_per_year),
            sharpe_ratio: if enough { Self::sharpe_ratio(&returns) } else { 0.0 },
            max_drawdown: Self::max_drawdown(&drawdowns),
            mean_drawdown: mean(&drawdowns),
            recovery: recovery::recovery_stats(series),
            outliers: outliers::detect_outliers(series, options.outlier_method),
            yearly_returns: calendar::yearly_returns(prices.clone()),
            monthly_seasonality: calendar::monthly_seasonality(series),
            all_time_highs: peaks::all_time_highs(prices),
            local_peaks: peaks::local_peaks(
                &series.iter().map(|r| r.price.clone()).collect::<Vec<_>>(),
                options.local_peak_spacing,
            ),
            volume_return_correlation: pearson_correlation(&volumes, &returns),
            warnings,
        };

        debug!(
            symbol = %stats.symbol,
            records = stats.records,
            sharpe = stats.sharpe_ratio,
            max_drawdown = stats.max_drawdown,
            outliers = stats.outliers.len(),
            "Summarized series"
        );
        stats
    }

    /// Mean, median and sample std of a column
    pub fn column_stats(values: &[f64]) -> ColumnStats {
        ColumnStats {
            mean: mean(values),
            median: median(values),
            std: sample_std(values),
        }
    }

    /// Unannualized Sharpe ratio: mean / sample std of daily returns
    ///
    /// Returns 0.0 at zero variance instead of dividing by zero.
    pub fn sharpe_ratio(returns: &[f64]) -> f64 {
        let std = sample_std(returns);
        if is_zero_variance(std) {
            return 0.0;
        }
        mean(returns) / std
    }

    /// abs(min(drawdown)); 0.0 with fewer than two points
    pub fn max_drawdown(drawdowns: &[f64]) -> f64 {
        if drawdowns.len() < MIN_RECORDS_FOR_ANALYSIS {
            return 0.0;
        }
        drawdowns.iter().copied().fold(0.0_f64, f64::min).abs()
    }

    /// Mean daily return (%) scaled to a year
    pub fn annualized_return(returns: &[f64], periods_per_year: f64) -> f64 {
        mean(returns) * periods_per_year
    }

    /// Sample std of daily returns (%) scaled by sqrt(periods per year)
    pub fn annualized_volatility(returns: &[f64], periods_per_year: f64) -> f64 {
        sample_std(returns) * periods_per_year.sqrt()
    }
}
