//! Load command implementation.
//!
//! Prints a summary of one symbol's bars, or exports them.

use crate::display::{Format, Output, export};
use anyhow::Result;
use quantplay_lib::prelude::*;
use std::path::PathBuf;

/// Load a symbol's bars for `interval` and summarize or export them.
pub(crate) fn load(
    manager: &DataManager,
    symbol: &str,
    interval: &str,
    output: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let table = manager.load_data(symbol, interval)?;

    if let Some(path) = output {
        export(Output::Ohlcv(&table), &path, format)?;
        println!("Wrote {} bars to {}", table.len(), path.display());
        return Ok(());
    }

    print_summary(symbol, interval, &table);
    Ok(())
}

fn print_summary(symbol: &str, interval: &str, table: &OhlcvTable) {
    println!("Symbol:   {symbol}");
    println!("Interval: {interval}");
    println!("Bars:     {}", table.len());

    let (Some(first), Some(last)) = (table.bars().first(), table.bars().last()) else {
        return;
    };
    println!("From:     {}", first.open_ts.format("%Y-%m-%d %H:%M:%S"));
    println!("To:       {}", last.open_ts.format("%Y-%m-%d %H:%M:%S"));
    println!("Last close: {}", last.close);
}
