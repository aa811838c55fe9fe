use super::{exit_with, format_number, load_dataset};
use crate::cli::GlobalArgs;
use crate::error::Result;

pub fn run(global: &GlobalArgs) {
    println!("📊 Price Data Status\n");

    if let Err(e) = show_status(global) {
        exit_with(e);
    }
}

fn show_status(global: &GlobalArgs) -> Result<()> {
    let dataset = load_dataset(global)?;

    if dataset.is_empty() {
        println!("⚠️  No price records found.");
        return Ok(());
    }

    let info = dataset.symbol_info();
    println!("📈 Total Symbols: {}\n", info.len());
    println!("═══════════════════════════════════════════════════════════\n");

    for symbol in &info {
        println!("🔹 {}", symbol.symbol);
        println!(
            "   Daily:  {:>8} records  ({} → {})",
            format_number(symbol.record_count),
            symbol.first_date,
            symbol.last_date
        );
        println!("           Latest close: {:.2}\n", symbol.last_close);
    }

    if !dataset.rejected().is_empty() {
        println!("⚠️  Rejected rows:");
        for row in dataset.rejected().iter().take(10) {
            println!("   line {}: {}", row.line, row.reason);
        }
    }

    Ok(())
}
