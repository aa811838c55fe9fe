//! Selection-driven pipeline
//!
//! `Dataset` is an immutable snapshot of the normalized table, loaded once.
//! Every selection change calls [`Dataset::analyze`], which re-runs window
//! slicing, the indicator engine and the aggregator from scratch.

use crate::error::{AppError, Result};
use crate::models::{IndicatorRecord, MarketData, PriceRecord, SummaryOptions, SummaryStats, ViewMode};
use crate::services::aggregator::Aggregator;
use crate::services::csv_parser::{read_price_csv, read_price_reader, RawRow};
use crate::services::indicator_engine::compute_indicators;
use crate::services::normalizer::{
    common_window, normalize, series_span, slice_window, slice_year, trim_incomplete_final_year,
    validate_series, LoadOutcome, LoaderOptions, RejectedRow,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// What the presenter asked for
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Selection {
    /// Symbols to analyze; empty means every symbol in the dataset
    pub symbols: Vec<String>,
    pub view: ViewMode,
    /// Optional clip applied after the view window
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub options: SummaryOptions,
}

impl Selection {
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbols: vec![symbol.into()],
            ..Self::default()
        }
    }
}

/// Indicators and statistics for one symbol
#[derive(Debug, Clone, Serialize)]
pub struct SymbolAnalysis {
    pub symbol: String,
    pub indicators: Vec<IndicatorRecord>,
    pub summary: SummaryStats,
}

/// Result of one `analyze` call, in symbol order
#[derive(Debug, Clone, Serialize)]
pub struct Analysis {
    pub view: ViewMode,
    /// Common window, when the view computed one
    pub window: Option<(NaiveDate, NaiveDate)>,
    pub symbols: Vec<SymbolAnalysis>,
}

impl Analysis {
    pub fn get(&self, symbol: &str) -> Option<&SymbolAnalysis> {
        self.symbols.iter().find(|s| s.symbol == symbol)
    }
}

/// Per-symbol overview used by the status command
#[derive(Debug, Clone, Serialize)]
pub struct SymbolInfo {
    pub symbol: String,
    pub record_count: usize,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    pub last_close: f64,
}

/// Read-only snapshot of the normalized price table
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    data: MarketData,
    rejected: Vec<RejectedRow>,
}

impl Dataset {
    /// Load and normalize a CSV file
    pub fn load(path: &Path, options: &LoaderOptions) -> Result<Self> {
        let rows = read_price_csv(path)?;
        Self::from_rows(&rows, options)
    }

    /// Load and normalize CSV from any reader
    pub fn from_reader<R: Read>(source: R, options: &LoaderOptions) -> Result<Self> {
        let rows = read_price_reader(source)?;
        Self::from_rows(&rows, options)
    }

    pub fn from_rows(rows: &[RawRow], options: &LoaderOptions) -> Result<Self> {
        let LoadOutcome { data, rejected, .. } = normalize(rows, options)?;
        Ok(Self { data, rejected })
    }

    /// Wrap an already-built table, applying the same checks as the loader
    pub fn from_market_data(data: MarketData) -> Result<Self> {
        for (symbol, series) in &data {
            validate_series(symbol, series)?;
        }
        Ok(Self {
            data,
            rejected: Vec::new(),
        })
    }

    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn series(&self, symbol: &str) -> Result<&[PriceRecord]> {
        self.data
            .get(symbol)
            .map(Vec::as_slice)
            .ok_or_else(|| AppError::UnknownSymbol(symbol.to_string()))
    }

    /// Rows dropped while loading
    pub fn rejected(&self) -> &[RejectedRow] {
        &self.rejected
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn symbol_info(&self) -> Vec<SymbolInfo> {
        self.data
            .iter()
            .filter_map(|(symbol, series)| {
                let (first_date, last_date) = series_span(series)?;
                Some(SymbolInfo {
                    symbol: symbol.clone(),
                    record_count: series.len(),
                    first_date,
                    last_date,
                    last_close: series.last()?.close,
                })
            })
            .collect()
    }

    /// Resolve requested names to dataset symbols; empty means all
    ///
    /// A name matches its uppercase form first, then itself verbatim.
    pub fn resolve_symbols(&self, requested: &[String]) -> Result<Vec<String>> {
        if requested.is_empty() {
            return Ok(self.data.keys().cloned().collect());
        }
        let mut symbols = Vec::with_capacity(requested.len());
        for symbol in requested {
            let upper = symbol.trim().to_uppercase();
            let name = if self.data.contains_key(&upper) { upper } else { symbol.trim().to_string() };
            self.series(&name)?;
            if !symbols.contains(&name) {
                symbols.push(name);
            }
        }
        Ok(symbols)
    }

    /// Common window across the given symbols
    pub fn common_window(&self, symbols: &[String]) -> Result<(NaiveDate, NaiveDate)> {
        let series = symbols
            .iter()
            .map(|s| self.series(s))
            .collect::<Result<Vec<_>>>()?;
        common_window(series)
    }

    /// Run the full pipeline for a selection
    pub fn analyze(&self, selection: &Selection) -> Result<Analysis> {
        let symbols = self.resolve_symbols(&selection.symbols)?;
        let window = match selection.view {
            ViewMode::Common => Some(self.common_window(&symbols)?),
            _ => None,
        };

        let mut results = Vec::with_capacity(symbols.len());
        for symbol in symbols {
            let full = self.series(&symbol)?;
            let viewed = match selection.view {
                ViewMode::Full => full,
                ViewMode::Common => {
                    let (start, end) = window.ok_or(AppError::EmptyWindow { start: None, end: None })?;
                    slice_window(full, Some(start), Some(end))
                }
                ViewMode::CompleteYears => trim_incomplete_final_year(full),
                ViewMode::Year(year) => slice_year(full, year),
            };
            let windowed = slice_window(viewed, selection.start, selection.end);

            let indicators = compute_indicators(windowed);
            let summary = Aggregator::summarize(&symbol, &indicators, &selection.options);
            debug!(%symbol, view = %selection.view, records = windowed.len(), "Analyzed symbol");

            results.push(SymbolAnalysis {
                symbol,
                indicators,
                summary,
            });
        }

        info!(view = %selection.view, symbols = results.len(), "Pipeline run complete");
        Ok(Analysis {
            view: selection.view,
            window,
            symbols: results,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn dataset() -> Dataset {
        let mut data = MarketData::new();
        let btc: Vec<PriceRecord> = (0..10)
            .map(|i| {
                let c = 100.0 + i as f64;
                PriceRecord::new("BTC", day(2020, 12, 25) + chrono::Duration::days(i), c, c, c, c, 10.0)
            })
            .collect();
        let eth: Vec<PriceRecord> = (0..5)
            .map(|i| {
                let c = 10.0 - i as f64;
                PriceRecord::new("ETH", day(2020, 12, 28) + chrono::Duration::days(i), c, c, c, c, 5.0)
            })
            .collect();
        data.insert("BTC".to_string(), btc);
        data.insert("ETH".to_string(), eth);
        Dataset::from_market_data(data).unwrap()
    }

    #[test]
    fn test_full_view() {
        let analysis = dataset().analyze(&Selection::for_symbol("BTC")).unwrap();

        assert_eq!(analysis.symbols.len(), 1);
        assert_eq!(analysis.window, None);
        let btc = analysis.get("BTC").unwrap();
        assert_eq!(btc.indicators.len(), 9);
        assert_eq!(btc.summary.records, 9);
    }

    #[test]
    fn test_symbol_lookup_is_case_insensitive() {
        let analysis = dataset().analyze(&Selection::for_symbol("eth")).unwrap();
        assert!(analysis.get("ETH").is_some());
    }

    #[test]
    fn test_common_view_uses_overlap() {
        let selection = Selection {
            view: ViewMode::Common,
            ..Selection::default()
        };
        let analysis = dataset().analyze(&selection).unwrap();

        assert_eq!(analysis.window, Some((day(2020, 12, 28), day(2021, 1, 1))));
        let btc = analysis.get("BTC").unwrap();
        assert_eq!(btc.summary.start, Some(day(2020, 12, 29)));
        assert_eq!(btc.summary.end, Some(day(2021, 1, 1)));
    }

    #[test]
    fn test_complete_years_and_year_views() {
        let data = dataset();

        let complete = Selection {
            view: ViewMode::CompleteYears,
            ..Selection::for_symbol("BTC")
        };
        let analysis = data.analyze(&complete).unwrap();
        assert_eq!(analysis.symbols[0].summary.end, Some(day(2020, 12, 31)));

        let year = Selection {
            view: ViewMode::Year(2021),
            ..Selection::for_symbol("BTC")
        };
        let analysis = data.analyze(&year).unwrap();
        assert_eq!(analysis.symbols[0].summary.start, Some(day(2021, 1, 2)));
    }

    #[test]
    fn test_date_clip_after_view() {
        let selection = Selection {
            start: Some(day(2020, 12, 30)),
            end: Some(day(2021, 1, 2)),
            ..Selection::for_symbol("BTC")
        };
        let analysis = dataset().analyze(&selection).unwrap();
        assert_eq!(analysis.symbols[0].indicators.len(), 3);
    }

    #[test]
    fn test_unknown_symbol() {
        let err = dataset().analyze(&Selection::for_symbol("DOGE")).unwrap_err();
        assert!(matches!(err, AppError::UnknownSymbol(ref s) if s == "DOGE"));
    }

    #[test]
    fn test_common_view_empty_window_is_an_error() {
        let mut data = MarketData::new();
        data.insert(
            "A".to_string(),
            vec![PriceRecord::new("A", day(2013, 1, 1), 1.0, 1.0, 1.0, 1.0, 1.0)],
        );
        data.insert(
            "B".to_string(),
            vec![PriceRecord::new("B", day(2015, 1, 1), 1.0, 1.0, 1.0, 1.0, 1.0)],
        );
        let selection = Selection {
            view: ViewMode::Common,
            ..Selection::default()
        };
        let err = Dataset::from_market_data(data).unwrap().analyze(&selection).unwrap_err();
        assert!(matches!(err, AppError::EmptyWindow { .. }));
    }

    #[test]
    fn test_symbol_info() {
        let info = dataset().symbol_info();
        assert_eq!(info.len(), 2);
        assert_eq!(info[0].symbol, "BTC");
        assert_eq!(info[0].record_count, 10);
        assert_eq!(info[0].last_date, day(2021, 1, 3));
        assert_eq!(info[1].last_close, 6.0);
    }

    #[test]
    fn test_summary_keeps_symbol_when_window_is_too_short() {
        let mut data = MarketData::new();
        data.insert(
            "ETH".to_string(),
            vec![
                PriceRecord::new("ETH", day(2020, 12, 31), 1.0, 1.0, 1.0, 1.0, 1.0),
                PriceRecord::new("ETH", day(2021, 1, 1), 2.0, 2.0, 2.0, 2.0, 2.0),
            ],
        );
        let selection = Selection {
            view: ViewMode::Year(2021),
            ..Selection::for_symbol("ETH")
        };
        let analysis = Dataset::from_market_data(data).unwrap().analyze(&selection).unwrap();
        let summary = &analysis.symbols[0].summary;

        assert_eq!(summary.symbol, "ETH");
        assert_eq!(summary.records, 0);
        assert!(summary.has_warnings());

        let json = serde_json::to_value(summary).unwrap();
        assert_eq!(json["symbol"], "ETH");
    }

    #[test]
    fn test_from_market_data_rejects_zero_close() {
        let mut data = MarketData::new();
        let series = [10.0, 0.0, 12.0, 11.0]
            .iter()
            .enumerate()
            .map(|(i, &c)| PriceRecord::new("BTC", day(2021, 1, 1) + chrono::Duration::days(i as i64), c, c, c, c, 1.0))
            .collect();
        data.insert("BTC".to_string(), series);

        let err = Dataset::from_market_data(data).unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg.contains("close is zero")));
    }

    #[test]
    fn test_resolve_symbols_prefers_uppercase_then_verbatim() {
        let mut data = MarketData::new();
        data.insert(
            "btc".to_string(),
            vec![PriceRecord::new("btc", day(2021, 1, 1), 1.0, 1.0, 1.0, 1.0, 1.0)],
        );
        data.insert(
            "ETH".to_string(),
            vec![PriceRecord::new("ETH", day(2021, 1, 1), 1.0, 1.0, 1.0, 1.0, 1.0)],
        );
        let dataset = Dataset::from_market_data(data).unwrap();

        let resolved = dataset
            .resolve_symbols(&["btc".to_string(), "eth".to_string(), "ETH".to_string()])
            .unwrap();
        assert_eq!(resolved, vec!["btc".to_string(), "ETH".to_string()]);
        assert_eq!(dataset.resolve_symbols(&[]).unwrap(), vec!["ETH".to_string(), "btc".to_string()]);
        assert!(dataset.resolve_symbols(&["doge".to_string()]).is_err());
    }
}
