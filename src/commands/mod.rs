pub mod indicators;
pub mod status;
pub mod summary;
pub mod window;

use crate::cli::{GlobalArgs, WindowArgs};
use crate::error::{AppError, Result};
use crate::models::ViewMode;
use crate::services::normalizer::parse_date;
use crate::services::{Dataset, LoaderOptions, ParsePolicy, Selection};
use crate::utils::get_data_file;
use chrono::NaiveDate;

/// Load the dataset named by the global flags, falling back to the env default
pub fn load_dataset(global: &GlobalArgs) -> Result<Dataset> {
    let path = global.data.clone().unwrap_or_else(get_data_file);
    let options = LoaderOptions {
        parse_policy: if global.strict { ParsePolicy::Abort } else { ParsePolicy::Skip },
    };

    let dataset = Dataset::load(&path, &options)?;
    if !dataset.rejected().is_empty() {
        eprintln!(
            "⚠️  Skipped {} malformed row(s) in {} (use --strict to abort instead)",
            dataset.rejected().len(),
            path.display()
        );
    }
    Ok(dataset)
}

fn parse_bound(value: Option<&str>, name: &str) -> Result<Option<NaiveDate>> {
    value
        .map(|v| {
            parse_date(v).ok_or_else(|| AppError::InvalidInput(format!("Invalid --{} date: '{}'", name, v)))
        })
        .transpose()
}

/// Build a selection from CLI window flags
pub fn build_selection(symbols: &[String], window: &WindowArgs) -> Result<Selection> {
    Ok(Selection {
        symbols: symbols.to_vec(),
        view: ViewMode::from_str(&window.view).map_err(AppError::InvalidInput)?,
        start: parse_bound(window.start.as_deref(), "start")?,
        end: parse_bound(window.end.as_deref(), "end")?,
        ..Selection::default()
    })
}

/// Print an error and exit with status 1
pub(crate) fn exit_with(err: AppError) -> ! {
    eprintln!("❌ Error: {}", err);
    std::process::exit(1);
}

pub(crate) fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}
