//! Representative price styles for return computation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::OhlcvBar;

/// Which price of a bar stands in for the bar when computing returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PriceStyle {
    /// The closing price.
    #[default]
    Close,
    /// The arithmetic mean of open, high, low and close.
    Ohlc,
}

impl PriceStyle {
    /// Returns the representative price of a bar under this style.
    #[must_use]
    pub fn price(&self, bar: &OhlcvBar) -> f64 {
        match self {
            Self::Close => bar.close,
            Self::Ohlc => (bar.close + bar.open + bar.high + bar.low) / 4.0,
        }
    }

    /// Returns the style as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Close => "close",
            Self::Ohlc => "ohlc",
        }
    }

    /// Returns all available styles.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Close, Self::Ohlc]
    }
}

impl std::fmt::Display for PriceStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PriceStyle {
    type Err = PriceStyleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "close" => Ok(Self::Close),
            "ohlc" => Ok(Self::Ohlc),
            _ => Err(PriceStyleParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unrecognized price style.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceStyleParseError(String);

impl PriceStyleParseError {
    /// Returns the rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PriceStyleParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown style: {}, expected one of: close, ohlc", self.0)
    }
}

impl std::error::Error for PriceStyleParseError {}
