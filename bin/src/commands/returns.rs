//! Returns command implementation.

use crate::display::{Format, Output, emit, parse_style};
use anyhow::Result;
use quantplay_lib::prelude::*;
use std::path::PathBuf;

/// Build the return matrix for `symbols` (or the whole universe) and print
/// or export it.
pub(crate) fn returns(
    manager: &DataManager,
    symbols: &[String],
    interval: &str,
    style: &str,
    output: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let style = parse_style(style)?;
    let symbols = if symbols.is_empty() {
        manager.list_universe()?
    } else {
        symbols.iter().map(|s| Symbol::from(s.as_str())).collect()
    };

    let ohlcv = manager.prep_ohlcv_data(&symbols, interval)?;
    let matrix = manager.prep_return_data(&ohlcv, style);
    tracing::info!(
        rows = matrix.nrows(),
        columns = matrix.ncols(),
        "built return matrix"
    );

    if matrix.ncols() < ohlcv.len() {
        tracing::warn!(
            dropped = ohlcv.len() - matrix.ncols(),
            "symbols dropped from the return matrix"
        );
    }

    emit(Output::Returns(&matrix), output.as_deref(), format)
}
