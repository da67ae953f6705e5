//! quantplay CLI - Crypto OHLCV return matrices and beta.

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use quantplay_lib::prelude::*;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod display;

use display::Format;

#[derive(Parser)]
#[command(name = "quantplay")]
#[command(about = "Crypto OHLCV return matrices and beta", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Directory holding one <SYMBOL>.parquet file per symbol
    #[arg(long, env = "QUANTPLAY_DATA_PATH", global = true)]
    data_path: Option<PathBuf>,

    /// JSON data configuration file (overrides --data-path)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// List the symbols available in the data directory
    Universe,

    /// Load one symbol's bars for an interval
    Load {
        /// Symbol (e.g., BTCUSDT)
        symbol: String,

        /// Bar interval (e.g., 1h, 1d)
        #[arg(short, long)]
        interval: String,

        /// Export the bars to this file instead of printing a summary
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Build the aligned return matrix
    Returns {
        /// Symbols to include. Defaults to the whole universe.
        symbols: Vec<String>,

        /// Bar interval (e.g., 1h, 1d)
        #[arg(short, long)]
        interval: String,

        /// Price used for returns (close, ohlc)
        #[arg(short, long, default_value = "close")]
        style: String,

        /// Output file path. Prints CSV to stdout when omitted.
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },

    /// Compute beta of a symbol against a benchmark
    Beta {
        /// Symbol whose exposure is measured
        symbol: String,

        /// Benchmark symbol
        #[arg(short, long, default_value = "BTCUSDT")]
        benchmark: String,

        /// Bar interval (e.g., 1h, 1d)
        #[arg(short, long)]
        interval: String,

        /// Price used for returns (close, ohlc)
        #[arg(short, long, default_value = "close")]
        style: String,

        /// Rolling window length. Computes rolling beta when given.
        #[arg(short, long)]
        window: Option<NonZeroUsize>,

        /// Output file path for rolling beta
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format for rolling beta
        #[arg(short, long, value_enum, default_value = "csv")]
        format: Format,
    },
}

/// Installs the global subscriber, honoring `RUST_LOG` when set.
fn init_tracing(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolves the data configuration from `--config`, then `--data-path`.
fn resolve_config(config: Option<PathBuf>, data_path: Option<PathBuf>) -> Result<DataConfig> {
    if let Some(path) = config {
        return DataConfig::from_json_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }
    Ok(data_path.map(DataConfig::new).unwrap_or_default())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.quiet);

    // Show help if no command provided
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config = resolve_config(cli.config, cli.data_path)?;
    tracing::debug!(data_path = %config.data_path.display(), "resolved data directory");
    let manager = DataManager::with_config(config);

    match command {
        Commands::Universe => commands::universe::list_universe(&manager),
        Commands::Load {
            symbol,
            interval,
            output,
            format,
        } => commands::load::load(&manager, &symbol, &interval, output, format),
        Commands::Returns {
            symbols,
            interval,
            style,
            output,
            format,
        } => commands::returns::returns(&manager, &symbols, &interval, &style, output, format),
        Commands::Beta {
            symbol,
            benchmark,
            interval,
            style,
            window,
            output,
            format,
        } => commands::beta::beta(
            &manager,
            &commands::beta::BetaArgs {
                symbol: &symbol,
                benchmark: &benchmark,
                interval: &interval,
                style: &style,
                window,
            },
            output,
            format,
        ),
    }
}
