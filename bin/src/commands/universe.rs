//! Universe command implementation.

use anyhow::Result;
use quantplay_lib::prelude::*;

/// Print every symbol available in the data directory.
pub(crate) fn list_universe(manager: &DataManager) -> Result<()> {
    let symbols = manager.list_universe()?;

    if symbols.is_empty() {
        println!("No symbols found in {}.", manager.data_path().display());
        return Ok(());
    }

    for symbol in &symbols {
        println!("{symbol}");
    }

    println!("\nTotal: {} symbols", symbols.len());
    Ok(())
}
