//! Loader/Normalizer
//!
//! Turns raw rows into validated, per-symbol, date-ordered series and
//! computes the date windows used for cross-symbol comparison.

use crate::constants::DATE_FORMATS;
use crate::error::{AppError, Result};
use crate::models::{MarketData, PriceRecord};
use crate::services::csv_parser::RawRow;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

/// What to do with a row that fails validation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParsePolicy {
    /// Drop the row, log a warning and keep loading
    #[default]
    Skip,
    /// Fail the whole load on the first bad row
    Abort,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    pub parse_policy: ParsePolicy,
}

/// A row dropped under `ParsePolicy::Skip`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    pub line: usize,
    pub reason: String,
}

/// Result of a load: the normalized table plus what was dropped
#[derive(Debug, Clone, Default)]
pub struct LoadOutcome {
    pub data: MarketData,
    pub rejected: Vec<RejectedRow>,
    /// (symbol, date) pairs that appeared more than once; last row won
    pub duplicates: usize,
}

/// Parse a date cell, discarding any time component
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(value, fmt)
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(value, fmt))
            .ok()
    })
}

fn parse_magnitude(row: &RawRow, name: &str, value: &str) -> Result<f64> {
    let parsed: f64 = value.trim().parse().map_err(|_| AppError::Parse {
        line: row.line,
        reason: format!("{} '{}' is not a number", name, value),
    })?;

    if !parsed.is_finite() {
        return Err(AppError::Parse {
            line: row.line,
            reason: format!("{} '{}' is not finite", name, value),
        });
    }
    if parsed < 0.0 {
        return Err(AppError::Parse {
            line: row.line,
            reason: format!("{} {} is negative", name, parsed),
        });
    }
    Ok(parsed)
}

/// Validate one raw row into a typed record
pub fn parse_row(row: &RawRow) -> Result<PriceRecord> {
    let symbol = row.symbol.trim();
    if symbol.is_empty() {
        return Err(AppError::Parse {
            line: row.line,
            reason: "empty symbol".to_string(),
        });
    }

    let date = parse_date(&row.date).ok_or_else(|| AppError::Parse {
        line: row.line,
        reason: format!("unparseable date '{}'", row.date),
    })?;

    let open = parse_magnitude(row, "open", &row.open)?;
    let high = parse_magnitude(row, "high", &row.high)?;
    let low = parse_magnitude(row, "low", &row.low)?;
    let close = parse_magnitude(row, "close", &row.close)?;
    let volume = parse_magnitude(row, "volume", &row.volume)?;

    if close == 0.0 {
        return Err(AppError::Parse {
            line: row.line,
            reason: "close is zero".to_string(),
        });
    }

    Ok(PriceRecord::new(symbol, date, open, high, low, close, volume))
}

/// Validate, group by symbol, order by date and de-duplicate
pub fn normalize(rows: &[RawRow], options: &LoaderOptions) -> Result<LoadOutcome> {
    let mut by_symbol: BTreeMap<String, BTreeMap<NaiveDate, PriceRecord>> = BTreeMap::new();
    let mut rejected = Vec::new();
    let mut duplicates = 0;

    for row in rows {
        let record = match parse_row(row) {
            Ok(record) => record,
            Err(AppError::Parse { line, reason }) if options.parse_policy == ParsePolicy::Skip => {
                warn!(line, %reason, "Rejected malformed row");
                rejected.push(RejectedRow { line, reason });
                continue;
            }
            Err(e) => return Err(e),
        };

        let series = by_symbol.entry(record.symbol.clone()).or_default();
        match series.entry(record.date) {
            Entry::Occupied(mut slot) => {
                duplicates += 1;
                warn!(
                    symbol = %record.symbol,
                    date = %record.date,
                    line = row.line,
                    "Duplicate (symbol, date), keeping last occurrence"
                );
                slot.insert(record);
            }
            Entry::Vacant(slot) => {
                slot.insert(record);
            }
        }
    }

    let data: MarketData = by_symbol
        .into_iter()
        .map(|(symbol, days)| (symbol, days.into_values().collect()))
        .collect();

    info!(
        symbols = data.len(),
        records = data.values().map(Vec::len).sum::<usize>(),
        rejected = rejected.len(),
        duplicates,
        "Normalized price table"
    );

    Ok(LoadOutcome {
        data,
        rejected,
        duplicates,
    })
}

/// Check an already-built series against the load-time rules
///
/// Every record must belong to `symbol`, carry finite non-negative fields and
/// a positive close, and dates must be strictly increasing.
pub fn validate_series(symbol: &str, series: &[PriceRecord]) -> Result<()> {
    let invalid = |date: NaiveDate, reason: String| {
        AppError::InvalidInput(format!("{} on {}: {}", symbol, date, reason))
    };

    let mut previous: Option<NaiveDate> = None;
    for record in series {
        if record.symbol != symbol {
            return Err(invalid(record.date, format!("record belongs to '{}'", record.symbol)));
        }
        let fields = [
            ("open", record.open),
            ("high", record.high),
            ("low", record.low),
            ("close", record.close),
            ("volume", record.volume),
        ];
        if let Some((name, value)) = fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Err(invalid(record.date, format!("{} {} is not a finite non-negative number", name, value)));
        }
        if record.close == 0.0 {
            return Err(invalid(record.date, "close is zero".to_string()));
        }
        if previous.is_some_and(|p| p >= record.date) {
            return Err(invalid(record.date, "dates are not strictly increasing".to_string()));
        }
        previous = Some(record.date);
    }
    Ok(())
}

/// First and last date of a series
pub fn series_span(series: &[PriceRecord]) -> Option<(NaiveDate, NaiveDate)> {
    Some((series.first()?.date, series.last()?.date))
}

/// Common window across symbols: latest first date to earliest last date
///
/// Symbols with no records make the window empty.
pub fn common_window<'a, I>(series_by_symbol: I) -> Result<(NaiveDate, NaiveDate)>
where
    I: IntoIterator<Item = &'a [PriceRecord]>,
{
    let mut start: Option<NaiveDate> = None;
    let mut end: Option<NaiveDate> = None;
    let mut seen = 0usize;

    for series in series_by_symbol {
        seen += 1;
        let Some((first, last)) = series_span(series) else {
            return Err(AppError::EmptyWindow { start, end });
        };
        start = Some(start.map_or(first, |s| s.max(first)));
        end = Some(end.map_or(last, |e| e.min(last)));
    }

    match (start, end) {
        (Some(s), Some(e)) if s <= e => {
            debug!(symbols = seen, start = %s, end = %e, "Computed common window");
            Ok((s, e))
        }
        _ => Err(AppError::EmptyWindow { start, end }),
    }
}

/// Common window over every symbol in a table
pub fn common_window_for(data: &MarketData) -> Result<(NaiveDate, NaiveDate)> {
    common_window(data.values().map(Vec::as_slice))
}

/// Records with `start <= date <= end`; either bound may be open
pub fn slice_window(
    series: &[PriceRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> &[PriceRecord] {
    let from = match start {
        Some(s) => series.partition_point(|r| r.date < s),
        None => 0,
    };
    let to = match end {
        Some(e) => series.partition_point(|r| r.date <= e),
        None => series.len(),
    };
    if from >= to {
        &[]
    } else {
        &series[from..to]
    }
}

/// Drop the trailing calendar year when the series stops before 31 December
pub fn trim_incomplete_final_year(series: &[PriceRecord]) -> &[PriceRecord] {
    let Some(last) = series.last() else {
        return series;
    };
    let year = last.date.year();
    let complete = last.date.month() == 12 && last.date.day() == 31;
    if complete {
        return series;
    }

    let keep = series.partition_point(|r| r.date.year() < year);
    debug!(
        symbol = %last.symbol,
        dropped_year = year,
        dropped = series.len() - keep,
        "Trimmed incomplete final year"
    );
    &series[..keep]
}

/// Records of a single calendar year
pub fn slice_year(series: &[PriceRecord], year: i32) -> &[PriceRecord] {
    let from = series.partition_point(|r| r.date.year() < year);
    let to = series.partition_point(|r| r.date.year() <= year);
    &series[from..to]
}
