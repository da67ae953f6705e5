//! Per-symbol returns aligned on a shared time index.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::{Series, Symbol};

/// A table of per-symbol period returns.
///
/// Columns are symbols in lexicographic order, rows are the timestamps
/// shared by every column. The matrix holds no missing values and no column
/// whose returns are all zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReturnMatrix {
    symbols: Vec<Symbol>,
    index: Vec<DateTime<Utc>>,
    rows: Vec<Vec<f64>>,
}

impl ReturnMatrix {
    /// Assembles a matrix from per-symbol return series.
    ///
    /// The series are outer-merged on their timestamps, so a timestamp missing
    /// from any series (or holding `NaN`) becomes a missing cell. Columns are
    /// then ordered by symbol, rows with any missing cell are dropped, and
    /// finally columns that are zero on every remaining row are dropped.
    /// When a series repeats a timestamp, the later observation wins.
    pub fn outer_merge<I>(columns: I) -> Self
    where
        I: IntoIterator<Item = (Symbol, Series)>,
    {
        let columns: Vec<(Symbol, Series)> = columns.into_iter().collect();
        let width = columns.len();

        let mut grid: BTreeMap<DateTime<Utc>, Vec<Option<f64>>> = BTreeMap::new();
        for (col, (_, series)) in columns.iter().enumerate() {
            for (ts, value) in series.points() {
                let row = grid.entry(*ts).or_insert_with(|| vec![None; width]);
                row[col] = (!value.is_nan()).then_some(*value);
            }
        }

        let mut order: Vec<usize> = (0..width).collect();
        order.sort_by(|&a, &b| columns[a].0.cmp(&columns[b].0));

        let mut index = Vec::new();
        let mut complete_rows = Vec::new();
        for (ts, row) in grid {
            let complete: Option<Vec<f64>> = order.iter().map(|&col| row[col]).collect();
            if let Some(values) = complete {
                index.push(ts);
                complete_rows.push(values);
            }
        }

        let keep: Vec<usize> = (0..width)
            .filter(|&k| complete_rows.iter().any(|row| row[k] != 0.0))
            .collect();

        let symbols = keep
            .iter()
            .map(|&k| columns[order[k]].0.clone())
            .collect();
        let rows = complete_rows
            .into_iter()
            .map(|row| keep.iter().map(|&k| row[k]).collect())
            .collect();

        Self {
            symbols,
            index,
            rows,
        }
    }

    /// Returns the column labels.
    #[must_use]
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Returns the row timestamps.
    #[must_use]
    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    /// Returns the number of rows.
    #[must_use]
    pub fn nrows(&self) -> usize {
        self.index.len()
    }

    /// Returns the number of columns.
    #[must_use]
    pub fn ncols(&self) -> usize {
        self.symbols.len()
    }

    /// Returns true if the matrix has no rows or no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nrows() == 0 || self.ncols() == 0
    }

    /// Returns a row of returns, ordered like [`symbols`](Self::symbols).
    #[must_use]
    pub fn row(&self, position: usize) -> Option<&[f64]> {
        self.rows.get(position).map(Vec::as_slice)
    }

    /// Iterates over `(timestamp, row)` pairs.
    pub fn iter_rows(&self) -> impl Iterator<Item = (DateTime<Utc>, &[f64])> {
        self.index
            .iter()
            .copied()
            .zip(self.rows.iter().map(Vec::as_slice))
    }

    /// Returns the position of a symbol's column.
    #[must_use]
    pub fn column_position(&self, symbol: &str) -> Option<usize> {
        self.symbols.iter().position(|s| s.as_str() == symbol)
    }

    /// Returns one symbol's returns as a time-indexed series.
    #[must_use]
    pub fn column(&self, symbol: &str) -> Option<Series> {
        let col = self.column_position(symbol)?;
        Some(self.iter_rows().map(|(ts, row)| (ts, row[col])).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, hour, 0, 0).unwrap()
    }

    fn series(points: &[(u32, f64)]) -> Series {
        points.iter().map(|&(h, v)| (ts(h), v)).collect()
    }

    #[test]
    fn test_columns_sorted_by_symbol() {
        let matrix = ReturnMatrix::outer_merge([
            (Symbol::from("ZZZUSDT"), series(&[(1, 0.1), (2, 0.2)])),
            (Symbol::from("AAAUSDT"), series(&[(1, 0.3), (2, 0.4)])),
        ]);
        let labels: Vec<_> = matrix.symbols().iter().map(Symbol::as_str).collect();
        assert_eq!(labels, vec!["AAAUSDT", "ZZZUSDT"]);
        assert_eq!(matrix.row(0), Some(&[0.3, 0.1][..]));
    }

    #[test]
    fn test_rows_restricted_to_common_timestamps() {
        let matrix = ReturnMatrix::outer_merge([
            (Symbol::from("AAAUSDT"), series(&[(1, 0.1), (2, 0.2), (3, 0.3)])),
            (Symbol::from("BBBUSDT"), series(&[(2, 0.5), (3, 0.6), (4, 0.7)])),
        ]);
        assert_eq!(matrix.index(), &[ts(2), ts(3)]);
        assert_eq!(matrix.ncols(), 2);
    }

    #[test]
    fn test_nan_counts_as_missing() {
        let matrix = ReturnMatrix::outer_merge([
            (Symbol::from("AAAUSDT"), series(&[(1, f64::NAN), (2, 0.2)])),
            (Symbol::from("BBBUSDT"), series(&[(1, 0.1), (2, 0.2)])),
        ]);
        assert_eq!(matrix.index(), &[ts(2)]);
    }

    #[test]
    fn test_all_zero_column_dropped() {
        let matrix = ReturnMatrix::outer_merge([
            (Symbol::from("AAAUSDT"), series(&[(1, 0.1), (2, -0.1)])),
            (Symbol::from("FLATUSDT"), series(&[(1, 0.0), (2, 0.0)])),
        ]);
        let labels: Vec<_> = matrix.symbols().iter().map(Symbol::as_str).collect();
        assert_eq!(labels, vec!["AAAUSDT"]);
        assert_eq!(matrix.row(1), Some(&[-0.1][..]));
    }

    #[test]
    fn test_no_common_rows_drops_every_column() {
        let matrix = ReturnMatrix::outer_merge([
            (Symbol::from("AAAUSDT"), series(&[(1, 0.1)])),
            (Symbol::from("BBBUSDT"), series(&[(2, 0.2)])),
        ]);
        assert_eq!(matrix.nrows(), 0);
        assert_eq!(matrix.ncols(), 0);
        assert!(matrix.is_empty());
    }

    #[test]
    fn test_column_as_series() {
        let matrix = ReturnMatrix::outer_merge([
            (Symbol::from("AAAUSDT"), series(&[(1, 0.1), (2, 0.2)])),
            (Symbol::from("BBBUSDT"), series(&[(1, 0.3), (2, 0.4)])),
        ]);
        let column = matrix.column("BBBUSDT").unwrap();
        assert_eq!(column.index(), vec![ts(1), ts(2)]);
        assert_eq!(column.values(), vec![0.3, 0.4]);
        assert!(matrix.column("CCCUSDT").is_none());
    }
}
