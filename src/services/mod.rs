pub mod aggregator;
pub mod calendar;
pub mod csv_parser;
pub mod csv_writer;
pub mod indicator_engine;
pub mod normalizer;
pub mod outliers;
pub mod peaks;
pub mod pipeline;
pub mod recovery;

pub use aggregator::Aggregator;
pub use csv_parser::{read_price_csv, read_price_reader, RawRow};
pub use csv_writer::write_indicator_csv;
pub use indicator_engine::{compute_indicators, compute_indicators_grouped};
pub use normalizer::{
    common_window, common_window_for, normalize, slice_window, trim_incomplete_final_year,
    validate_series, LoadOutcome, LoaderOptions, ParsePolicy, RejectedRow,
};
pub use pipeline::{Analysis, Dataset, Selection, SymbolAnalysis, SymbolInfo};
