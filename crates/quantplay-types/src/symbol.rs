//! Tradable instrument identifiers.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;

/// Quote currency marker every universe symbol must carry.
const QUOTE_MARKER: &str = "USDT";

/// Identifier of a tradable instrument (e.g., `BTCUSDT`).
///
/// Symbols order lexicographically, which is the column order of a
/// [`ReturnMatrix`](crate::ReturnMatrix).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol from any string.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Extracts the universe symbol from a file name, if it qualifies.
    ///
    /// A file qualifies when its name ends with `.{extension}`, contains no
    /// underscore and contains `USDT`. The symbol is the text before the
    /// first `.`.
    #[must_use]
    pub fn from_file_name(file_name: &str, extension: &str) -> Option<Self> {
        let qualifies = file_name
            .strip_suffix(extension)
            .is_some_and(|rest| rest.ends_with('.'))
            && !file_name.contains('_')
            && file_name.contains(QUOTE_MARKER);
        if !qualifies {
            return None;
        }
        let stem = file_name.split('.').next().unwrap_or_default();
        Some(Self::new(stem))
    }

    /// Returns the file name holding this symbol's table.
    #[must_use]
    pub fn file_name(&self, extension: &str) -> String {
        format!("{}.{extension}", self.0)
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for Symbol {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Symbol {
    fn borrow(&self) -> &str {
        &self.0
    }
}
