//! Crypto OHLCV data loading and beta analytics.
//!
//! This is a facade crate that re-exports functionality from the quantplay
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use quantplay_lib::prelude::*;
//! use std::num::NonZeroUsize;
//!
//! fn main() -> Result<()> {
//!     let manager = DataManager::new("data");
//!     let universe = manager.list_universe()?;
//!     let ohlcv = manager.prep_ohlcv_data(&universe, "1h")?;
//!     let returns = manager.prep_return_data(&ohlcv, PriceStyle::Close);
//!
//!     if let (Some(btc), Some(eth)) = (returns.column("BTCUSDT"), returns.column("ETHUSDT")) {
//!         let indicators = Indicators::new();
//!         println!("beta: {}", indicators.beta(&eth, &btc));
//!         let window = NonZeroUsize::new(24).unwrap_or(NonZeroUsize::MIN);
//!         let rolling = indicators.rolling_beta(&eth, &btc, window);
//!         println!("{} rolling values", rolling.count_valid());
//!     }
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quantplay/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use quantplay_types::*;

// Re-export data access
#[cfg(feature = "data")]
pub use quantplay_data::{DataConfig, DataManager, return_series};

// Re-export indicators
#[cfg(feature = "indicators")]
pub use quantplay_indicators::{Indicators, sample_covariance};

// Re-export formatters
#[cfg(feature = "format")]
pub use quantplay_format::{
    CsvFormatter, FormatError, Formatter, JsonFormatter, JsonStyle, OutputFormat,
    ParquetFormatter, ParquetReader,
};

/// Prelude module for convenient imports.
///
/// ```
/// use quantplay_lib::prelude::*;
/// ```
pub mod prelude {
    pub use quantplay_types::{
        OhlcvBar, OhlcvMap, OhlcvTable, PriceStyle, QuantError, Result, ReturnMatrix, Series,
        Symbol,
    };

    #[cfg(feature = "data")]
    pub use quantplay_data::{DataConfig, DataManager};

    #[cfg(feature = "indicators")]
    pub use quantplay_indicators::Indicators;

    #[cfg(feature = "format")]
    pub use quantplay_format::{CsvFormatter, Formatter, JsonFormatter, OutputFormat};
}
