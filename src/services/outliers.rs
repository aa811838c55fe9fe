//! Outlier detection
//!
//! Three independent strategies, see [`OutlierMethod`]. Quantiles use linear
//! interpolation between order statistics.

use crate::constants::{IQR_FENCE_MULTIPLIER, ZSCORE_THRESHOLD};
use crate::models::indicators::{is_zero_variance, mean, quantile, sample_std};
use crate::models::{IndicatorRecord, Outlier, OutlierMethod, OutlierSet};
use chrono::NaiveDate;
use tracing::debug;

/// Which IQR fences flag a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fences {
    UpperOnly,
    Both,
}

/// Run the selected strategy over an indicator series
pub fn detect_outliers(series: &[IndicatorRecord], method: OutlierMethod) -> OutlierSet {
    let dates: Vec<NaiveDate> = series.iter().map(|r| r.price.date).collect();
    let set = match method {
        OutlierMethod::IqrRange => {
            let values: Vec<f64> = series.iter().map(|r| r.daily_range).collect();
            iqr_outliers(&dates, &values, Fences::UpperOnly, method)
        }
        OutlierMethod::IqrVolume => {
            let values: Vec<f64> = series.iter().map(|r| r.volume()).collect();
            iqr_outliers(&dates, &values, Fences::Both, method)
        }
        OutlierMethod::ZScoreReturn => {
            let values: Vec<f64> = series.iter().map(|r| r.daily_return).collect();
            zscore_outliers(&dates, &values)
        }
    };

    debug!(
        method = %method,
        scanned = series.len(),
        flagged = set.len(),
        "Outlier scan"
    );
    set
}

/// IQR scan: Q1/Q3 quartiles, fences at Q1 - 1.5*IQR and Q3 + 1.5*IQR
///
/// `dates` and `values` are aligned; extra entries in either are ignored.
pub fn iqr_outliers(
    dates: &[NaiveDate],
    values: &[f64],
    fences: Fences,
    method: OutlierMethod,
) -> OutlierSet {
    let n = dates.len().min(values.len());
    if n == 0 {
        return OutlierSet::empty(method);
    }
    let values = &values[..n];

    let q1 = quantile(values, 0.25);
    let q3 = quantile(values, 0.75);
    let iqr = q3 - q1;
    let upper = q3 + IQR_FENCE_MULTIPLIER * iqr;
    let lower = match fences {
        Fences::UpperOnly => None,
        Fences::Both => Some(q1 - IQR_FENCE_MULTIPLIER * iqr),
    };

    let outliers = dates
        .iter()
        .zip(values)
        .filter_map(|(&date, &value)| {
            let score = if value > upper {
                value - upper
            } else if let Some(low) = lower.filter(|&low| value < low) {
                low - value
            } else {
                return None;
            };
            Some(Outlier { date, value, score })
        })
        .collect();

    OutlierSet {
        method,
        lower_fence: lower,
        upper_fence: upper,
        outliers,
    }
}

/// Z-score scan: |(x - mean) / std| > 2; nothing is flagged at zero variance
pub fn zscore_outliers(dates: &[NaiveDate], values: &[f64]) -> OutlierSet {
    let method = OutlierMethod::ZScoreReturn;
    let n = dates.len().min(values.len());
    let values = &values[..n];

    let m = mean(values);
    let std = sample_std(values);
    if is_zero_variance(std) {
        return OutlierSet {
            method,
            lower_fence: Some(m),
            upper_fence: m,
            outliers: Vec::new(),
        };
    }

    let outliers = dates
        .iter()
        .zip(values)
        .filter_map(|(&date, &value)| {
            let z = (value - m) / std;
            (z.abs() > ZSCORE_THRESHOLD).then_some(Outlier { date, value, score: z })
        })
        .collect();

    OutlierSet {
        method,
        lower_fence: Some(m - ZSCORE_THRESHOLD * std),
        upper_fence: m + ZSCORE_THRESHOLD * std,
        outliers,
    }
}
