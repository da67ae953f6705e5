//! JSON output format.

use chrono::{DateTime, Utc};
use quantplay_types::{OhlcvTable, ReturnMatrix, Series};
use serde::Serialize;
use serde_json::{Map, Value};
use std::io::Write;

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// JSON array (standard JSON).
    #[default]
    Array,
    /// Newline-delimited JSON (NDJSON/JSONL).
    Ndjson,
}

/// JSON formatter.
///
/// Return matrices and series are written as records keyed by `open_ts`
/// and column name. Missing values become `null`.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    /// Output style.
    style: JsonStyle,
    /// Whether to pretty-print (only for array style).
    pretty: bool,
}

impl JsonFormatter {
    /// Creates a new JSON formatter with default settings (array style).
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
            pretty: false,
        }
    }

    /// Creates a new NDJSON formatter.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
            pretty: false,
        }
    }

    /// Sets whether to pretty-print output (array style only).
    #[must_use]
    pub const fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    /// Sets the output style.
    #[must_use]
    pub const fn with_style(mut self, style: JsonStyle) -> Self {
        self.style = style;
        self
    }

    /// Writes records in the configured style.
    fn write_records<T: Serialize, W: Write>(
        &self,
        records: &[T],
        mut writer: W,
    ) -> Result<(), FormatError> {
        match self.style {
            JsonStyle::Array => {
                if self.pretty {
                    serde_json::to_writer_pretty(&mut writer, records)?;
                } else {
                    serde_json::to_writer(&mut writer, records)?;
                }
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writeln!(writer)?;
                }
            }
        }
        Ok(())
    }
}

/// Builds one `{"open_ts": .., name: value, ..}` record, fields in column
/// order.
fn record<'a>(ts: DateTime<Utc>, cells: impl Iterator<Item = (&'a str, f64)>) -> Value {
    let mut fields = Map::new();
    fields.insert("open_ts".to_string(), Value::String(ts.to_rfc3339()));
    for (name, value) in cells {
        let cell = serde_json::Number::from_f64(value).map_or(Value::Null, Value::Number);
        fields.insert(name.to_string(), cell);
    }
    Value::Object(fields)
}

impl Formatter for JsonFormatter {
    fn write_ohlcv<W: Write + Send>(
        &self,
        table: &OhlcvTable,
        writer: W,
    ) -> Result<(), FormatError> {
        self.write_records(table.bars(), writer)
    }

    fn write_returns<W: Write + Send>(
        &self,
        matrix: &ReturnMatrix,
        writer: W,
    ) -> Result<(), FormatError> {
        let records: Vec<Value> = matrix
            .iter_rows()
            .map(|(ts, row)| {
                record(
                    ts,
                    matrix
                        .symbols()
                        .iter()
                        .map(|s| s.as_str())
                        .zip(row.iter().copied()),
                )
            })
            .collect();
        self.write_records(&records, writer)
    }

    fn write_series<W: Write + Send>(
        &self,
        name: &str,
        series: &Series,
        writer: W,
    ) -> Result<(), FormatError> {
        let records: Vec<Value> = series
            .points()
            .iter()
            .map(|(ts, value)| record(*ts, std::iter::once((name, *value))))
            .collect();
        self.write_records(&records, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
