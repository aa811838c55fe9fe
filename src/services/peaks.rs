//! Peak marking on close prices
//!
//! All-time highs feed the history view; local peaks are chart annotations
//! only and play no part in drawdown math.

use crate::models::indicators::mean;
use crate::models::{PeakMark, PriceRecord};

/// Records whose close equals the running maximum of close (ties count)
pub fn all_time_highs<'a, I>(records: I) -> Vec<PeakMark>
where
    I: IntoIterator<Item = &'a PriceRecord>,
{
    let mut running_max = f64::MIN;
    let mut marks = Vec::new();

    for (index, record) in records.into_iter().enumerate() {
        running_max = running_max.max(record.close);
        if record.close == running_max {
            marks.push(PeakMark {
                index,
                date: record.date,
                close: record.close,
            });
        }
    }

    marks
}

/// Indices of local maxima; a flat top yields its middle index
fn local_maxima(values: &[f64]) -> Vec<usize> {
    let mut peaks = Vec::new();
    if values.len() < 3 {
        return peaks;
    }

    let last = values.len() - 1;
    let mut i = 1;
    while i < last {
        if values[i - 1] < values[i] {
            // Walk across a plateau
            let mut ahead = i + 1;
            while ahead < last && values[ahead] == values[i] {
                ahead += 1;
            }
            if values[ahead] < values[i] {
                let right = ahead - 1;
                peaks.push((i + right) / 2);
                i = ahead;
                continue;
            }
        }
        i += 1;
    }

    peaks
}

/// Local maxima of close above the series mean, at least `min_spacing`
/// records apart; when two candidates are too close the higher close wins
pub fn local_peaks(records: &[PriceRecord], min_spacing: usize) -> Vec<PeakMark> {
    let closes: Vec<f64> = records.iter().map(|r| r.close).collect();
    let threshold = mean(&closes);

    let mut candidates: Vec<usize> = local_maxima(&closes)
        .into_iter()
        .filter(|&i| closes[i] > threshold)
        .collect();

    // Highest first, earlier index breaks ties
    candidates.sort_by(|&a, &b| closes[b].total_cmp(&closes[a]).then(a.cmp(&b)));

    let mut kept: Vec<usize> = Vec::new();
    for candidate in candidates {
        if kept.iter().all(|&k| candidate.abs_diff(k) >= min_spacing) {
            kept.push(candidate);
        }
    }
    kept.sort_unstable();

    kept.into_iter()
        .map(|index| PeakMark {
            index,
            date: records[index].date,
            close: records[index].close,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn records(closes: &[f64]) -> Vec<PriceRecord> {
        let start = NaiveDate::from_ymd_opt(2017, 1, 1).unwrap();
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceRecord::new("BTC", start + chrono::Duration::days(i as i64), c, c, c, c, 1.0))
            .collect()
    }

    #[test]
    fn test_all_time_highs_include_ties() {
        let marks = all_time_highs(&records(&[10.0, 12.0, 11.0, 12.0, 15.0, 14.0]));
        let indices: Vec<usize> = marks.iter().map(|m| m.index).collect();
        assert_eq!(indices, vec![0, 1, 3, 4]);
    }

    #[test]
    fn test_local_maxima_plateau_midpoint() {
        assert_eq!(local_maxima(&[1.0, 3.0, 3.0, 3.0, 1.0]), vec![2]);
        assert_eq!(local_maxima(&[1.0, 2.0, 1.0, 2.0, 1.0]), vec![1, 3]);
        // Edges are never peaks
        assert!(local_maxima(&[5.0, 1.0, 5.0]).is_empty());
        // Plateau running into the edge is not a peak
        assert!(local_maxima(&[1.0, 2.0, 2.0]).is_empty());
    }

    #[test]
    fn test_local_peaks_above_mean_only() {
        // Peak at index 1 (close 2) is below the mean
        let closes = [1.0, 2.0, 1.0, 10.0, 1.0, 1.0];
        let peaks = local_peaks(&records(&closes), 1);
        assert_eq!(peaks.len(), 1);
        assert_eq!(peaks[0].index, 3);
    }

    #[test]
    fn test_local_peaks_min_spacing_keeps_higher() {
        let mut closes = vec![1.0; 80];
        closes[10] = 50.0;
        closes[20] = 60.0; // within 30 of index 10, higher
        closes[60] = 55.0;
        let peaks = local_peaks(&records(&closes), 30);

        let indices: Vec<usize> = peaks.iter().map(|p| p.index).collect();
        assert_eq!(indices, vec![20, 60]);
    }
}
