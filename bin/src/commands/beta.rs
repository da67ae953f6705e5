//! Beta command implementation.
//!
//! Both symbols are loaded together so their returns share the aligned
//! index of one return matrix.

use crate::display::{Format, Output, emit, parse_style};
use anyhow::{Context, Result};
use quantplay_lib::prelude::*;
use std::num::NonZeroUsize;
use std::path::PathBuf;

/// Parsed `beta` command arguments.
pub(crate) struct BetaArgs<'a> {
    pub(crate) symbol: &'a str,
    pub(crate) benchmark: &'a str,
    pub(crate) interval: &'a str,
    pub(crate) style: &'a str,
    pub(crate) window: Option<NonZeroUsize>,
}

/// Returns the aligned `(asset, benchmark)` return columns.
fn aligned_returns(manager: &DataManager, args: &BetaArgs<'_>) -> Result<(Series, Series)> {
    let style = parse_style(args.style)?;
    let ohlcv = manager.prep_ohlcv_data(&[args.symbol, args.benchmark], args.interval)?;
    let matrix = manager.prep_return_data(&ohlcv, style);

    let column = |symbol: &str| {
        matrix.column(symbol).with_context(|| {
            format!("{symbol} has no usable returns at interval {}", args.interval)
        })
    };
    Ok((column(args.symbol)?, column(args.benchmark)?))
}

/// Compute beta, or rolling beta when a window is given.
pub(crate) fn beta(
    manager: &DataManager,
    args: &BetaArgs<'_>,
    output: Option<PathBuf>,
    format: Format,
) -> Result<()> {
    let (asset, benchmark) = aligned_returns(manager, args)?;
    let indicators = Indicators::new();

    let Some(window) = args.window else {
        let beta = indicators.beta(&asset, &benchmark);
        println!(
            "beta({} vs {}, {}, {} obs): {beta:.6}",
            args.symbol,
            args.benchmark,
            args.interval,
            asset.len()
        );
        return Ok(());
    };

    let rolling = indicators.rolling_beta(&asset, &benchmark, window);
    tracing::info!(
        window = window.get(),
        defined = rolling.count_valid(),
        "computed rolling beta"
    );
    emit(Output::Series("rolling_beta", &rolling), output.as_deref(), format)
}
