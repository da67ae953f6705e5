//! OHLCV bar and table data structures.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::PriceStyle;

/// A single OHLCV bar tagged with its sampling interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OhlcvBar {
    /// Bar open time.
    pub open_ts: DateTime<Utc>,
    /// Sampling interval label (e.g., `1h`, `1d`).
    pub interval: String,
    /// Opening price.
    pub open: f64,
    /// Highest price during the period.
    pub high: f64,
    /// Lowest price during the period.
    pub low: f64,
    /// Closing price.
    pub close: f64,
    /// Traded volume, when the source table carries it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub volume: Option<f64>,
}

impl OhlcvBar {
    /// Creates a new bar.
    #[must_use]
    pub fn new(
        open_ts: DateTime<Utc>,
        interval: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: Option<f64>,
    ) -> Self {
        Self {
            open_ts,
            interval: interval.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

/// An ordered table of OHLCV bars.
///
/// Row position is the table's index; filtering produces a fresh contiguous
/// index. Rows are kept in the order they were read, not sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OhlcvTable {
    bars: Vec<OhlcvBar>,
}

impl OhlcvTable {
    /// Creates a table from bars in the given order.
    #[must_use]
    pub const fn new(bars: Vec<OhlcvBar>) -> Self {
        Self { bars }
    }

    /// Returns the bars as a slice.
    #[must_use]
    pub fn bars(&self) -> &[OhlcvBar] {
        &self.bars
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Returns true if the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Returns an iterator over the bars.
    pub fn iter(&self) -> std::slice::Iter<'_, OhlcvBar> {
        self.bars.iter()
    }

    /// Returns the distinct interval labels in first-seen order.
    #[must_use]
    pub fn intervals(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for bar in &self.bars {
            if !seen.contains(&bar.interval.as_str()) {
                seen.push(&bar.interval);
            }
        }
        seen
    }

    /// Returns a new table holding only rows with exactly this interval.
    #[must_use]
    pub fn filter_interval(&self, interval: &str) -> Self {
        self.bars
            .iter()
            .filter(|b| b.interval == interval)
            .cloned()
            .collect()
    }

    /// Returns the open timestamps in row order.
    #[must_use]
    pub fn timestamps(&self) -> Vec<DateTime<Utc>> {
        self.bars.iter().map(|b| b.open_ts).collect()
    }

    /// Returns the representative price of every row under `style`.
    #[must_use]
    pub fn prices(&self, style: PriceStyle) -> Vec<f64> {
        self.bars.iter().map(|b| style.price(b)).collect()
    }
}

impl FromIterator<OhlcvBar> for OhlcvTable {
    fn from_iter<I: IntoIterator<Item = OhlcvBar>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for OhlcvTable {
    type Item = OhlcvBar;
    type IntoIter = std::vec::IntoIter<OhlcvBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.into_iter()
    }
}

impl<'a> IntoIterator for &'a OhlcvTable {
    type Item = &'a OhlcvBar;
    type IntoIter = std::slice::Iter<'a, OhlcvBar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}

impl From<Vec<OhlcvBar>> for OhlcvTable {
    fn from(bars: Vec<OhlcvBar>) -> Self {
        Self::new(bars)
    }
}
