//! Time-indexed numeric series.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// An ordered sequence of `(timestamp, value)` observations.
///
/// `NaN` marks a missing observation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Series {
    points: Vec<(DateTime<Utc>, f64)>,
}

impl Series {
    /// Creates a series from observations in the given order.
    #[must_use]
    pub const fn new(points: Vec<(DateTime<Utc>, f64)>) -> Self {
        Self { points }
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Returns true if the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns the observations as a slice.
    #[must_use]
    pub fn points(&self) -> &[(DateTime<Utc>, f64)] {
        &self.points
    }

    /// Returns the timestamps in order.
    #[must_use]
    pub fn index(&self) -> Vec<DateTime<Utc>> {
        self.points.iter().map(|(ts, _)| *ts).collect()
    }

    /// Returns the values in order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|(_, v)| *v).collect()
    }

    /// Returns the value at a position.
    #[must_use]
    pub fn get(&self, position: usize) -> Option<f64> {
        self.points.get(position).map(|(_, v)| *v)
    }

    /// Returns the number of non-missing observations.
    #[must_use]
    pub fn count_valid(&self) -> usize {
        self.points.iter().filter(|(_, v)| !v.is_nan()).count()
    }

    /// Aligns two series on matching timestamps.
    ///
    /// Keeps the timestamps present in both, in `self`'s order, and returns
    /// them alongside the paired values. Missing values are kept.
    #[must_use]
    pub fn align(&self, other: &Self) -> (Vec<DateTime<Utc>>, Vec<f64>, Vec<f64>) {
        let lookup: HashMap<DateTime<Utc>, f64> = other.points.iter().copied().collect();
        let mut index = Vec::with_capacity(self.len().min(other.len()));
        let mut left = Vec::with_capacity(index.capacity());
        let mut right = Vec::with_capacity(index.capacity());
        for (ts, value) in &self.points {
            if let Some(other_value) = lookup.get(ts) {
                index.push(*ts);
                left.push(*value);
                right.push(*other_value);
            }
        }
        (index, left, right)
    }
}

impl FromIterator<(DateTime<Utc>, f64)> for Series {
    fn from_iter<I: IntoIterator<Item = (DateTime<Utc>, f64)>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
