//! CSV input edge
//!
//! Reads the raw daily price table into untyped rows. Columns are located by
//! header name (case-insensitive) so extra columns such as `SNo` or `Name`
//! and any column order are accepted. Typing and validation happen in the
//! normalizer.

use crate::constants::csv_column;
use crate::error::{AppError, Result};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// One untyped data row with its 1-based line number in the source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRow {
    pub line: usize,
    pub symbol: String,
    pub date: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl RawRow {
    /// Build a row from string fields; mainly useful in tests and for
    /// callers that already hold parsed cells
    pub fn new(line: usize, fields: [&str; 7]) -> Self {
        let [symbol, date, open, high, low, close, volume] = fields;
        Self {
            line,
            symbol: symbol.to_string(),
            date: date.to_string(),
            open: open.to_string(),
            high: high.to_string(),
            low: low.to_string(),
            close: close.to_string(),
            volume: volume.to_string(),
        }
    }
}

/// Column positions of the required fields, in `csv_column::ALL` order
#[derive(Debug, Clone, Copy)]
struct ColumnIndex([usize; 7]);

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let mut positions = [0usize; 7];
        for (slot, name) in csv_column::ALL.iter().enumerate() {
            positions[slot] = headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
                .ok_or_else(|| AppError::InvalidInput(format!("Missing required column '{}'", name)))?;
        }
        Ok(Self(positions))
    }

    fn row(&self, record: &StringRecord, line: usize) -> RawRow {
        let get = |slot: usize| record.get(self.0[slot]).unwrap_or("");
        RawRow::new(line, [get(0), get(1), get(2), get(3), get(4), get(5), get(6)])
    }
}

/// Read raw rows from a CSV file on disk
pub fn read_price_csv(path: &Path) -> Result<Vec<RawRow>> {
    let file = std::fs::File::open(path)
        .map_err(|e| AppError::Io(format!("Failed to open {}: {}", path.display(), e)))?;
    let rows = read_price_reader(file)?;
    info!(path = %path.display(), rows = rows.len(), "Read price CSV");
    Ok(rows)
}

/// Read raw rows from any CSV source with a header line
pub fn read_price_reader<R: Read>(source: R) -> Result<Vec<RawRow>> {
    let mut reader = ReaderBuilder::new()
        .trim(Trim::All)
        .flexible(true)
        .from_reader(source);

    let columns = ColumnIndex::from_headers(reader.headers()?)?;
    debug!(?columns, "Resolved CSV columns");

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(rows.len() + 2);

        // Blank trailing lines
        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        rows.push(columns.row(&record, line));
    }

    Ok(rows)
}
