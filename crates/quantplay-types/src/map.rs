//! Insertion-ordered symbol to table mapping.

use crate::{OhlcvTable, Symbol};

/// Per-symbol OHLCV tables in insertion order.
///
/// Keys are unique. Inserting an existing symbol replaces its table and keeps
/// the symbol's first position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OhlcvMap {
    entries: Vec<(Symbol, OhlcvTable)>,
}

impl OhlcvMap {
    /// Creates an empty map.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts a table, returning the previous table for the symbol if any.
    pub fn insert(&mut self, symbol: Symbol, table: OhlcvTable) -> Option<OhlcvTable> {
        match self.entries.iter_mut().find(|(s, _)| *s == symbol) {
            Some((_, existing)) => Some(std::mem::replace(existing, table)),
            None => {
                self.entries.push((symbol, table));
                None
            }
        }
    }

    /// Looks up the table for a symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&OhlcvTable> {
        self.entries
            .iter()
            .find(|(s, _)| s.as_str() == symbol)
            .map(|(_, table)| table)
    }

    /// Returns the number of symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the map holds no symbols.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the symbols in insertion order.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.entries.iter().map(|(s, _)| s)
    }

    /// Returns `(symbol, table)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Symbol, &OhlcvTable)> {
        self.entries.iter().map(|(s, t)| (s, t))
    }
}

impl FromIterator<(Symbol, OhlcvTable)> for OhlcvMap {
    fn from_iter<I: IntoIterator<Item = (Symbol, OhlcvTable)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (symbol, table) in iter {
            map.insert(symbol, table);
        }
        map
    }
}

impl IntoIterator for OhlcvMap {
    type Item = (Symbol, OhlcvTable);
    type IntoIter = std::vec::IntoIter<(Symbol, OhlcvTable)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
