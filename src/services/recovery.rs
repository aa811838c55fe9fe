//! Drawdown recovery scan
//!
//! Walks a drawdown series in date order. An episode opens at the first
//! index with drawdown below -5% while no episode is open, and closes at the
//! first later index with drawdown at or above -1%. Episodes still open at
//! the end of the series are discarded.

use crate::constants::{
    EPISODE_END_DRAWDOWN, EPISODE_START_DRAWDOWN, NEUTRAL_EFFICIENCY_SCORE, PERIODS_PER_YEAR,
};
use crate::models::{DrawdownEpisode, IndicatorRecord, RecoveryStats};
use chrono::NaiveDate;

/// Closed episodes as (start_index, end_index, trough)
pub fn scan_episodes(drawdowns: &[f64]) -> Vec<(usize, usize, f64)> {
    let mut episodes = Vec::new();
    let mut open: Option<(usize, f64)> = None;

    for (i, &dd) in drawdowns.iter().enumerate() {
        match open {
            None if dd < EPISODE_START_DRAWDOWN => open = Some((i, dd)),
            None => {}
            Some((start, trough)) if dd >= EPISODE_END_DRAWDOWN => {
                if i > start {
                    episodes.push((start, i, trough));
                }
                open = None;
            }
            Some((start, trough)) => open = Some((start, trough.min(dd))),
        }
    }

    episodes
}

/// Efficiency score in [0, 100] from recovery lengths in rows
///
/// `max(0, 100 - mean_length / 365 * 100)`, or 50 with no episodes.
pub fn efficiency_score(recovery_times: &[usize]) -> f64 {
    if recovery_times.is_empty() {
        return NEUTRAL_EFFICIENCY_SCORE;
    }
    let mean_length = recovery_times.iter().sum::<usize>() as f64 / recovery_times.len() as f64;
    (100.0 - mean_length / PERIODS_PER_YEAR * 100.0).max(0.0)
}

/// Recovery statistics for an indicator series
pub fn recovery_stats(series: &[IndicatorRecord]) -> RecoveryStats {
    let drawdowns: Vec<f64> = series.iter().map(|r| r.drawdown).collect();
    let dates: Vec<NaiveDate> = series.iter().map(|r| r.price.date).collect();
    recovery_from_drawdowns(&drawdowns, &dates)
}

/// Recovery statistics from aligned drawdown and date slices
pub fn recovery_from_drawdowns(drawdowns: &[f64], dates: &[NaiveDate]) -> RecoveryStats {
    let n = drawdowns.len().min(dates.len());
    let episodes: Vec<DrawdownEpisode> = scan_episodes(&drawdowns[..n])
        .into_iter()
        .map(|(start_index, end_index, trough)| DrawdownEpisode {
            start_index,
            end_index,
            start_date: dates[start_index],
            end_date: dates[end_index],
            trough,
        })
        .collect();
    let recovery_times: Vec<usize> = episodes.iter().map(DrawdownEpisode::length).collect();
    let efficiency_score = efficiency_score(&recovery_times);

    RecoveryStats {
        episodes,
        recovery_times,
        efficiency_score,
    }
}
