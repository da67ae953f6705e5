//! CSV output format.

use chrono::{DateTime, Utc};
use quantplay_types::{OhlcvTable, ReturnMatrix, Series};
use std::io::Write;

use crate::{FormatError, Formatter};

/// Renders a timestamp the way every CSV column writes it.
fn format_ts(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Renders a value, leaving missing cells empty.
fn format_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}

/// CSV formatter.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
    /// Whether to include header row.
    include_header: bool,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            delimiter: ',',
            include_header: true,
        }
    }

    /// Sets the field delimiter.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Sets whether to include a header row.
    #[must_use]
    pub const fn with_header(mut self, include: bool) -> Self {
        self.include_header = include;
        self
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self {
            delimiter: '\t',
            include_header: true,
        }
    }
}

impl Formatter for CsvFormatter {
    fn write_ohlcv<W: Write + Send>(
        &self,
        table: &OhlcvTable,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(
                writer,
                "open_ts{d}interval{d}open{d}high{d}low{d}close{d}volume"
            )?;
        }

        for bar in table {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                format_ts(&bar.open_ts),
                bar.interval,
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume.map(format_value).unwrap_or_default()
            )?;
        }

        Ok(())
    }

    fn write_returns<W: Write + Send>(
        &self,
        matrix: &ReturnMatrix,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter.to_string();

        if self.include_header {
            let mut header = vec!["open_ts"];
            header.extend(matrix.symbols().iter().map(|s| s.as_str()));
            writeln!(writer, "{}", header.join(&d))?;
        }

        for (ts, row) in matrix.iter_rows() {
            let mut fields = vec![format_ts(&ts)];
            fields.extend(row.iter().map(|v| format_value(*v)));
            writeln!(writer, "{}", fields.join(&d))?;
        }

        Ok(())
    }

    fn write_series<W: Write + Send>(
        &self,
        name: &str,
        series: &Series,
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;

        if self.include_header {
            writeln!(writer, "open_ts{d}{name}")?;
        }

        for (ts, value) in series.points() {
            writeln!(writer, "{}{d}{}", format_ts(ts), format_value(*value))?;
        }

        Ok(())
    }

    fn extension(&self) -> &str {
        "csv"
    }
}
