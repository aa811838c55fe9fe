use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::commands;

#[derive(Parser)]
#[command(name = "cryptolens")]
#[command(about = "Crypto price EDA: returns, drawdowns, recovery, outliers", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Price CSV (defaults to $CRYPTO_DATA_FILE or data/cryptocurrency.csv)
    #[arg(short, long, global = true)]
    pub data: Option<PathBuf>,

    /// Abort on the first malformed row instead of skipping it
    #[arg(long, global = true)]
    pub strict: bool,
}

#[derive(Args, Debug, Clone)]
pub struct WindowArgs {
    /// View: full, common, complete-years or year:YYYY
    #[arg(long, default_value = "full")]
    pub view: String,

    /// Inclusive start date (YYYY-MM-DD)
    #[arg(long)]
    pub start: Option<String>,

    /// Inclusive end date (YYYY-MM-DD)
    #[arg(long)]
    pub end: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show records and date span per symbol
    Status,
    /// Show the common date window across symbols
    Window {
        /// Symbols to compare (default: all)
        #[arg(short, long)]
        symbols: Vec<String>,
    },
    /// Print summary statistics
    Summary {
        /// Symbols to analyze (default: all)
        #[arg(short, long)]
        symbols: Vec<String>,

        #[command(flatten)]
        window: WindowArgs,

        /// Outlier method: iqr-range, iqr-volume or zscore-return
        #[arg(long, default_value = "iqr-range")]
        outliers: String,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Export per-day indicators as CSV
    Indicators {
        /// Symbol to export
        #[arg(short, long)]
        symbol: String,

        #[command(flatten)]
        window: WindowArgs,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

pub fn run() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Status => {
            commands::status::run(&cli.global);
        }
        Commands::Window { symbols } => {
            commands::window::run(&cli.global, &symbols);
        }
        Commands::Summary {
            symbols,
            window,
            outliers,
            json,
        } => {
            commands::summary::run(&cli.global, &symbols, &window, &outliers, json);
        }
        Commands::Indicators {
            symbol,
            window,
            output,
        } => {
            commands::indicators::run(&cli.global, &symbol, &window, output.as_deref());
        }
    }
}
