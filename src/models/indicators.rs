//! Numeric building blocks for indicators and summary statistics
//!
//! # Conventions
//! - Returns and drawdowns are percentages (2.5 means +2.5%)
//! - Standard deviations are sample deviations (n - 1 denominator)
//! - Degenerate inputs (empty slices, zero variance) yield 0.0, never NaN

use crate::constants::ZERO_VARIANCE_EPSILON;

/// Calculate percentage change: ((current - previous) / previous) * 100
///
/// # Returns
/// * `None` when `previous` is zero or the result is not finite
pub fn calculate_pct_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        return None;
    }
    let change = (current / previous - 1.0) * 100.0;
    change.is_finite().then_some(change)
}

/// Arithmetic mean, 0.0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Median, 0.0 for an empty slice
pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

/// Sample standard deviation, 0.0 with fewer than two values
pub fn sample_std(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let m = mean(values);
    let variance = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    variance.sqrt()
}

/// True when a deviation is too small to divide by
pub fn is_zero_variance(std: f64) -> bool {
    !std.is_finite() || std < ZERO_VARIANCE_EPSILON
}

/// Quantile with linear interpolation between order statistics
///
/// # Arguments
/// * `values` - Unsorted sample
/// * `q` - Quantile in [0, 1] (0.25 for Q1, 0.75 for Q3)
///
/// # Example
/// ```
/// // [1, 2, 3, 4]: position 0.75 * 3 = 2.25 -> 3 + 0.25 * (4 - 3) = 3.25
/// ```
pub fn quantile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        sorted[lo]
    } else {
        let frac = pos - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * frac
    }
}

/// Calculate trailing sample standard deviation for a given window
///
/// # Returns
/// * Vector aligned with `values`; entries before a full window are `None`
pub fn calculate_rolling_std(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut result = vec![None; values.len()];

    if window < 2 || values.len() < window {
        return result;
    }

    for i in (window - 1)..values.len() {
        let start_idx = i + 1 - window;
        result[i] = Some(sample_std(&values[start_idx..=i]));
    }

    result
}

/// Pearson correlation coefficient, 0.0 when undefined
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return 0.0;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = mean(xs);
    let my = mean(ys);

    let mut cov = 0.0;
    let mut vx = 0.0;
    let mut vy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mx;
        let dy = y - my;
        cov += dx * dy;
        vx += dx * dx;
        vy += dy * dy;
    }

    let denom = (vx * vy).sqrt();
    if denom == 0.0 || !denom.is_finite() {
        0.0
    } else {
        (cov / denom).clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_pct_change() {
        assert!((calculate_pct_change(110.0, 100.0).unwrap() - 10.0).abs() < 1e-9);
        assert!((calculate_pct_change(90.0, 100.0).unwrap() - (-10.0)).abs() < 1e-9);
        assert_eq!(calculate_pct_change(100.0, 0.0), None);
    }

    #[test]
    fn test_quantile_interpolates() {
        let values = vec![4.0, 1.0, 3.0, 2.0];
        assert_eq!(quantile(&values, 0.0), 1.0);
        assert_eq!(quantile(&values, 1.0), 4.0);
        assert!((quantile(&values, 0.75) - 3.25).abs() < 1e-12);
        assert!((median(&values) - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_sample_std() {
        let values = vec![2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Sample variance = 32 / 7
        assert!((sample_std(&values) - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
        assert_eq!(sample_std(&[1.0]), 0.0);
        assert_eq!(sample_std(&[]), 0.0);
    }

    #[test]
    fn test_calculate_rolling_std() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        let rolling = calculate_rolling_std(&values, 3);

        assert_eq!(rolling[0], None); // Not enough data
        assert_eq!(rolling[1], None); // Not enough data
        assert!((rolling[2].unwrap() - 1.0).abs() < 1e-12);
        assert!((rolling[3].unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pearson_correlation() {
        let xs = vec![1.0, 2.0, 3.0, 4.0];
        let ys = vec![2.0, 4.0, 6.0, 8.0];
        assert!((pearson_correlation(&xs, &ys) - 1.0).abs() < 1e-12);

        let inverse: Vec<f64> = ys.iter().map(|y| -y).collect();
        assert!((pearson_correlation(&xs, &inverse) + 1.0).abs() < 1e-12);

        // Constant series has no defined correlation
        assert_eq!(pearson_correlation(&xs, &[5.0, 5.0, 5.0, 5.0]), 0.0);
    }

    #[test]
    fn test_zero_variance_guard() {
        assert!(is_zero_variance(0.0));
        assert!(is_zero_variance(f64::NAN));
        assert!(!is_zero_variance(0.5));
    }
}
