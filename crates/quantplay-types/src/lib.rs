//! Core types for the quantplay research toolkit.
//!
//! This crate provides the fundamental data structures used throughout quantplay:
//!
//! - [`Symbol`] - Tradable instrument identifier derived from a file stem
//! - [`OhlcvBar`] / [`OhlcvTable`] - Price bars tagged with their interval
//! - [`OhlcvMap`] - Insertion-ordered symbol to table mapping
//! - [`PriceStyle`] - Representative price used for return computation
//! - [`Series`] - Time-indexed numeric sequence
//! - [`ReturnMatrix`] - Per-symbol returns aligned on a shared time index

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/quantplay/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod bar;
mod error;
mod map;
mod returns;
mod series;
mod style;
mod symbol;

pub use bar::{OhlcvBar, OhlcvTable};
pub use error::{QuantError, Result};
pub use map::OhlcvMap;
pub use returns::ReturnMatrix;
pub use series::Series;
pub use style::{PriceStyle, PriceStyleParseError};
pub use symbol::Symbol;
