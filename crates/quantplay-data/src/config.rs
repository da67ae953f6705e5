//! Data directory configuration.

use quantplay_types::{QuantError, Result, Symbol};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default table file extension.
const DEFAULT_EXTENSION: &str = "parquet";

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

/// Where the per-symbol table files live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding one `<SYMBOL>.<extension>` file per symbol.
    pub data_path: PathBuf,
    /// Table file extension, without the leading dot.
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data"),
            extension: default_extension(),
        }
    }
}

impl DataConfig {
    /// Creates a configuration for the given directory.
    #[must_use]
    pub fn new(data_path: impl Into<PathBuf>) -> Self {
        Self {
            data_path: data_path.into(),
            ..Self::default()
        }
    }

    /// Sets the table file extension.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        serde_json::from_str(&content).map_err(QuantError::from)
    }

    /// Returns the path of a symbol's table file.
    #[must_use]
    pub fn symbol_path(&self, symbol: &str) -> PathBuf {
        self.data_path.join(Symbol::from(symbol).file_name(&self.extension))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_symbol_path() {
        let config = DataConfig::new("/srv/ohlcv");
        assert_eq!(
            config.symbol_path("BTCUSDT"),
            PathBuf::from("/srv/ohlcv/BTCUSDT.parquet")
        );
    }

    #[test]
    fn test_from_json_file_defaults_extension() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"data_path": "/srv/ohlcv"}"#).unwrap();

        let config = DataConfig::from_json_file(&path).unwrap();
        assert_eq!(config, DataConfig::new("/srv/ohlcv"));
    }

    #[test]
    fn test_from_json_file_invalid() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "data_path = 3").unwrap();

        let err = DataConfig::from_json_file(&path).unwrap_err();
        assert!(matches!(err, QuantError::Json(_)));
    }
}
