use super::{exit_with, load_dataset};
use crate::cli::GlobalArgs;
use crate::error::Result;

pub fn run(global: &GlobalArgs, symbols: &[String]) {
    if let Err(e) = show_window(global, symbols) {
        exit_with(e);
    }
}

fn show_window(global: &GlobalArgs, symbols: &[String]) -> Result<()> {
    let dataset = load_dataset(global)?;
    let symbols = dataset.resolve_symbols(symbols)?;

    let (start, end) = dataset.common_window(&symbols)?;
    let days = (end - start).num_days() + 1;

    println!("📅 Common window for {}", symbols.join(", "));
    println!("   {} → {} ({} days)", start, end, days);
    Ok(())
}
