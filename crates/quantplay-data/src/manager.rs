//! Universe discovery, table loading and return assembly.

use quantplay_format::{Formatter, ParquetFormatter, ParquetReader};
use quantplay_types::{
    OhlcvMap, OhlcvTable, PriceStyle, QuantError, Result, ReturnMatrix, Series, Symbol,
};
use std::collections::BTreeSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::DataConfig;

/// Loads per-symbol OHLCV tables from a data directory and reshapes them
/// into return series.
///
/// Holds only its immutable configuration; every call reads fresh from disk.
#[derive(Debug, Clone)]
pub struct DataManager {
    config: DataConfig,
}

impl DataManager {
    /// Creates a manager over `data_path` with the default `parquet` extension.
    #[must_use]
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self::with_config(DataConfig::new(data_path))
    }

    /// Creates a manager from a full configuration.
    #[must_use]
    pub const fn with_config(config: DataConfig) -> Self {
        Self { config }
    }

    /// Returns the manager's configuration.
    #[must_use]
    pub const fn config(&self) -> &DataConfig {
        &self.config
    }

    /// Returns the data directory.
    #[must_use]
    pub fn data_path(&self) -> &Path {
        &self.config.data_path
    }

    /// Lists the symbols available in the data directory, sorted.
    ///
    /// Only files named `<SYMBOL>.<extension>` whose name contains `USDT` and
    /// no underscore qualify.
    ///
    /// # Errors
    ///
    /// Returns [`QuantError::ReadDir`] if the directory cannot be listed.
    pub fn list_universe(&self) -> Result<Vec<Symbol>> {
        let dir = self.data_path();
        let read_dir_err = |source| QuantError::ReadDir {
            path: dir.to_path_buf(),
            source,
        };

        let mut symbols = BTreeSet::new();
        for entry in fs::read_dir(dir).map_err(read_dir_err)? {
            let entry = entry.map_err(read_dir_err)?;
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if let Some(symbol) = Symbol::from_file_name(&name, &self.config.extension)
                && entry.path().is_file()
            {
                symbols.insert(symbol);
            }
        }

        debug!(path = %dir.display(), count = symbols.len(), "listed universe");
        Ok(symbols.into_iter().collect())
    }

    /// Loads one symbol's table, keeping only rows of the given interval.
    ///
    /// Rows keep their file order and get a fresh contiguous index.
    ///
    /// # Errors
    ///
    /// - [`QuantError::SymbolNotFound`] if the symbol has no table file
    /// - [`QuantError::MissingColumn`] if a required column is absent
    /// - [`QuantError::IntervalNotFound`] if no row carries `interval`
    pub fn load_data(&self, symbol: &str, interval: &str) -> Result<OhlcvTable> {
        let path = self.config.symbol_path(symbol);
        if !path.is_file() {
            return Err(QuantError::SymbolNotFound {
                symbol: symbol.to_string(),
                path,
            });
        }

        let table = ParquetReader::new().read_ohlcv(File::open(&path)?)?;
        let available = table.intervals();
        if !available.contains(&interval) {
            debug!(symbol, interval, ?available, "interval not in table");
            return Err(QuantError::IntervalNotFound {
                interval: interval.to_string(),
                symbol: symbol.to_string(),
            });
        }

        let filtered = table.filter_interval(interval);
        debug!(
            symbol,
            interval,
            rows = filtered.len(),
            total = table.len(),
            "loaded table"
        );
        Ok(filtered)
    }

    /// Loads every symbol's table for one interval, in input order.
    ///
    /// # Errors
    ///
    /// Returns the first [`load_data`](Self::load_data) failure; no partial
    /// result is produced.
    pub fn prep_ohlcv_data<S: AsRef<str>>(
        &self,
        symbols: &[S],
        interval: &str,
    ) -> Result<OhlcvMap> {
        let mut data = OhlcvMap::new();
        for symbol in symbols {
            let symbol = symbol.as_ref();
            let table = self.load_data(symbol, interval)?;
            data.insert(Symbol::from(symbol), table);
        }
        Ok(data)
    }

    /// Builds the aligned return matrix for the given tables.
    ///
    /// Each symbol contributes the percentage change of its representative
    /// price, keyed by the later bar's `open_ts`. The per-symbol series are
    /// outer-merged on timestamp, ordered by symbol, restricted to rows with
    /// no missing value, and stripped of all-zero columns.
    #[must_use]
    pub fn prep_return_data(&self, ohlcv: &OhlcvMap, style: PriceStyle) -> ReturnMatrix {
        let columns = ohlcv.iter().map(|(symbol, table)| {
            let returns = return_series(table, style);
            trace!(%symbol, %style, observations = returns.len(), "computed returns");
            (symbol.clone(), returns)
        });
        let matrix = ReturnMatrix::outer_merge(columns);

        debug!(
            symbols = ohlcv.len(),
            kept = matrix.ncols(),
            rows = matrix.nrows(),
            %style,
            "assembled return matrix"
        );
        matrix
    }

    /// Writes a table to the symbol's file as Parquet, replacing any
    /// existing file. Creates the data directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be written.
    pub fn save_data(&self, symbol: &str, table: &OhlcvTable) -> Result<PathBuf> {
        fs::create_dir_all(self.data_path())?;
        let path = self.config.symbol_path(symbol);
        let writer = BufWriter::new(File::create(&path)?);
        ParquetFormatter::new().write_ohlcv(table, writer)?;

        debug!(symbol, rows = table.len(), path = %path.display(), "saved table");
        Ok(path)
    }
}

/// Computes the period-over-period returns of a table's representative price.
///
/// The first row has no prior price and is dropped, so the result has one
/// observation fewer than the table, keyed by each later row's `open_ts`.
#[must_use]
pub fn return_series(table: &OhlcvTable, style: PriceStyle) -> Series {
    let prices = table.prices(style);
    table
        .iter()
        .skip(1)
        .zip(prices.windows(2))
        .map(|(bar, pair)| (bar.open_ts, pair[1] / pair[0] - 1.0))
        .collect()
}
