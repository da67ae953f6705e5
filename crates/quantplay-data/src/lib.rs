//! OHLCV data manager for quantplay.
//!
//! - [`DataConfig`] - Data directory and table file extension
//! - [`DataManager`] - Universe discovery, table loading and return assembly
//! - [`return_series`] - Period-over-period returns of a single table
//!
//! # Example
//!
//! ```no_run
//! use quantplay_data::DataManager;
//! use quantplay_types::PriceStyle;
//!
//! # fn main() -> quantplay_types::Result<()> {
//! let manager = DataManager::new("data");
//! let symbols = manager.list_universe()?;
//! let ohlcv = manager.prep_ohlcv_data(&symbols, "1h")?;
//! let returns = manager.prep_return_data(&ohlcv, PriceStyle::Close);
//! println!("{} rows x {} symbols", returns.nrows(), returns.ncols());
//! # Ok(())
//! # }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quantplay/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod manager;

pub use config::DataConfig;
pub use manager::{DataManager, return_series};
