use super::{build_selection, exit_with, load_dataset};
use crate::cli::{GlobalArgs, WindowArgs};
use crate::error::{AppError, Result};
use crate::services::write_indicator_csv;
use std::path::Path;

pub fn run(global: &GlobalArgs, symbol: &str, window: &WindowArgs, output: Option<&Path>) {
    if let Err(e) = export(global, symbol, window, output) {
        exit_with(e);
    }
}

fn export(global: &GlobalArgs, symbol: &str, window: &WindowArgs, output: Option<&Path>) -> Result<()> {
    let dataset = load_dataset(global)?;
    let selection = build_selection(&[symbol.to_string()], window)?;
    let analysis = dataset.analyze(&selection)?;

    let Some(result) = analysis.symbols.first() else {
        return Err(AppError::UnknownSymbol(symbol.to_string()));
    };

    match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .map_err(|e| AppError::Io(format!("Failed to create {}: {}", path.display(), e)))?;
            let written = write_indicator_csv(file, &result.indicators)?;
            eprintln!("✅ Wrote {} {} indicator rows to {}", written, result.symbol, path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_indicator_csv(stdout.lock(), &result.indicators)?;
        }
    }

    Ok(())
}
