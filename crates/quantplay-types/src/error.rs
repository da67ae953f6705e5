//! Error types for quantplay.

use std::path::PathBuf;
use thiserror::Error;

use crate::PriceStyleParseError;

/// Result type alias for quantplay operations.
pub type Result<T> = std::result::Result<T, QuantError>;

/// Errors that can occur while loading and reshaping price data.
#[derive(Error, Debug)]
pub enum QuantError {
    /// No table file exists for the requested symbol.
    #[error("No data file for symbol {symbol} at '{path}'")]
    SymbolNotFound {
        /// The symbol that was requested.
        symbol: String,
        /// The path that was looked up.
        path: PathBuf,
    },

    /// The requested interval does not appear in the symbol's table.
    #[error("Interval {interval} not found in the data for {symbol}")]
    IntervalNotFound {
        /// The interval that was requested.
        interval: String,
        /// The symbol whose table was searched.
        symbol: String,
    },

    /// Unrecognized return style option.
    #[error(transparent)]
    UnknownStyle(#[from] PriceStyleParseError),

    /// A required column is missing from a table.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Failed to list the data directory.
    #[error("Failed to read directory '{path}': {source}")]
    ReadDir {
        /// The directory that could not be listed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Arrow/Parquet decoding or encoding failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
