use super::{build_selection, exit_with, load_dataset};
use crate::cli::{GlobalArgs, WindowArgs};
use crate::error::{AppError, Result};
use crate::models::{OutlierMethod, SummaryStats};
use crate::services::Analysis;

pub fn run(global: &GlobalArgs, symbols: &[String], window: &WindowArgs, outliers: &str, json: bool) {
    if let Err(e) = summarize(global, symbols, window, outliers, json) {
        exit_with(e);
    }
}

fn summarize(
    global: &GlobalArgs,
    symbols: &[String],
    window: &WindowArgs,
    outliers: &str,
    json: bool,
) -> Result<()> {
    let dataset = load_dataset(global)?;
    let mut selection = build_selection(symbols, window)?;
    selection.options.outlier_method = OutlierMethod::from_str(outliers).map_err(AppError::InvalidInput)?;

    let analysis = dataset.analyze(&selection)?;

    if json {
        let summaries: Vec<&SummaryStats> = analysis.symbols.iter().map(|s| &s.summary).collect();
        println!("{}", serde_json::to_string_pretty(&summaries)?);
    } else {
        print_analysis(&analysis);
    }
    Ok(())
}

fn print_analysis(analysis: &Analysis) {
    println!("📊 Summary ({} view)", analysis.view);
    if let Some((start, end)) = analysis.window {
        println!("📅 Common window: {} → {}", start, end);
    }

    for symbol in &analysis.symbols {
        println!("\n═══════════════════════════════════════════════════════════\n");
        print_summary(&symbol.summary);
    }
}

fn print_summary(s: &SummaryStats) {
    let span = match (s.start, s.end) {
        (Some(start), Some(end)) => format!("{} → {}", start, end),
        _ => "N/A".to_string(),
    };
    println!("🔹 {}  ({} records, {})", s.symbol, s.records, span);

    for warning in &s.warnings {
        println!("   ⚠️  {}", warning);
    }

    println!("   Close:   mean {:.2}  median {:.2}  std {:.2}", s.close.mean, s.close.median, s.close.std);
    println!("   Volume:  mean {:.0}  median {:.0}  std {:.0}", s.volume.mean, s.volume.median, s.volume.std);
    println!(
        "   Return:  daily {:.3}%  annualized {:.2}%  volatility {:.2}%",
        s.mean_daily_return, s.annualized_return, s.annualized_volatility
    );
    println!("   Sharpe:  {:.4}", s.sharpe_ratio);
    println!(
        "   Drawdown: max {:.2}%  mean {:.2}%",
        s.max_drawdown, s.mean_drawdown
    );
    println!(
        "   Recovery: {} episode(s), efficiency {:.1}/100",
        s.recovery.episodes.len(),
        s.recovery.efficiency_score
    );
    println!(
        "   Outliers ({} on {}): {}",
        s.outliers.method,
        s.outliers.method.column(),
        s.outliers.len()
    );
    println!(
        "   Peaks:   {} all-time high(s), {} local peak(s)",
        s.all_time_highs.len(),
        s.local_peaks.len()
    );
    println!("   Volume/return correlation: {:.3}", s.volume_return_correlation);

    if !s.yearly_returns.is_empty() {
        println!("\n   Year    Return");
        for y in &s.yearly_returns {
            println!("   {}  {:>+9.2}%", y.year, y.return_pct);
        }
        if let Some(best) = s.best_year() {
            println!("   Best year: {} ({:+.2}%)", best.year, best.return_pct);
        }
    }

    if !s.monthly_seasonality.is_empty() {
        println!("\n   Month  Mean return  Mean volume");
        for m in &s.monthly_seasonality {
            println!("   {:>5}  {:>+10.3}%  {:>11.0}", m.month, m.mean_return, m.mean_volume);
        }
    }
}
