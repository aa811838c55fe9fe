//! Exploratory analysis of daily cryptocurrency OHLCV series.
//!
//! The pipeline has three stages, each a pure function over immutable data:
//!
//! | Stage | Entry point |
//! |-------|-------------|
//! | Loader/Normalizer | [`services::normalize`], [`services::common_window`] |
//! | Indicator Engine | [`services::compute_indicators`] |
//! | Aggregator | [`services::Aggregator::summarize`] |
//!
//! [`services::Dataset`] wraps them behind a selection (symbols, view mode,
//! date range) for presenters that recompute on every change.
//!
//! ```
//! use cryptolens::services::{Dataset, LoaderOptions, Selection};
//!
//! let csv = "Symbol,Date,Open,High,Low,Close,Volume\n\
//!            BTC,2021-01-01,100,110,95,105,1000\n\
//!            BTC,2021-01-02,105,120,100,115,1500\n\
//!            BTC,2021-01-03,115,118,90,92,2500\n";
//! let dataset = Dataset::from_reader(csv.as_bytes(), &LoaderOptions::default()).unwrap();
//! let analysis = dataset.analyze(&Selection::for_symbol("BTC")).unwrap();
//!
//! let btc = analysis.get("BTC").unwrap();
//! assert_eq!(btc.indicators.len(), 2);
//! assert!(btc.summary.max_drawdown > 0.0);
//! ```

pub mod cli;
pub mod commands;
pub mod constants;
pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{AppError, Result};
