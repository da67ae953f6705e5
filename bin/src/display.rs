//! Display utilities and output formatting for the quantplay CLI.

use anyhow::{Result, bail};
use clap::ValueEnum;
use quantplay_lib::prelude::*;
use quantplay_lib::ParquetFormatter;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format for exported data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Json,
    Ndjson,
    Parquet,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
            Format::Parquet => Self::Parquet,
        }
    }
}

/// Something the CLI can hand to a [`Formatter`].
#[derive(Clone, Copy)]
pub(crate) enum Output<'a> {
    Ohlcv(&'a OhlcvTable),
    Returns(&'a ReturnMatrix),
    Series(&'a str, &'a Series),
}

impl Output<'_> {
    fn emit<F: Formatter, W: Write + Send>(self, formatter: &F, writer: W) -> Result<()> {
        match self {
            Self::Ohlcv(table) => formatter.write_ohlcv(table, writer)?,
            Self::Returns(matrix) => formatter.write_returns(matrix, writer)?,
            Self::Series(name, series) => formatter.write_series(name, series, writer)?,
        }
        Ok(())
    }
}

/// Write data to a writer in the specified format.
fn write_to<W: Write + Send>(output: Output<'_>, format: OutputFormat, writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => output.emit(&CsvFormatter::new(), writer),
        OutputFormat::Json => output.emit(&JsonFormatter::new(), writer),
        OutputFormat::Ndjson => output.emit(&JsonFormatter::ndjson(), writer),
        OutputFormat::Parquet => output.emit(&ParquetFormatter::new(), writer),
    }
}

/// Write data to a file in the specified format.
pub(crate) fn export(output: Output<'_>, path: &Path, format: Format) -> Result<()> {
    let format = OutputFormat::from(format);
    if path.extension().and_then(|ext| ext.to_str()) != Some(format.extension()) {
        tracing::warn!(
            path = %path.display(),
            %format,
            "output extension does not match format"
        );
    }

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_to(output, format, &mut writer)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), %format, "wrote output");
    Ok(())
}

/// Write data to stdout in the specified format.
pub(crate) fn print(output: Output<'_>, format: Format) -> Result<()> {
    let format = OutputFormat::from(format);
    if format == OutputFormat::Parquet {
        bail!("Parquet output requires --output");
    }
    let mut writer = BufWriter::new(std::io::stdout());
    write_to(output, format, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Export to `path` when given, otherwise print to stdout.
pub(crate) fn emit(output: Output<'_>, path: Option<&Path>, format: Format) -> Result<()> {
    match path {
        Some(path) => export(output, path, format),
        None => print(output, format),
    }
}

/// Parse a price style, keeping the library's error message.
pub(crate) fn parse_style(s: &str) -> Result<PriceStyle> {
    Ok(s.parse::<PriceStyle>().map_err(QuantError::from)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_parse_style() {
        assert_eq!(parse_style("ohlc").unwrap(), PriceStyle::Ohlc);
        let err = parse_style("typo").unwrap_err();
        assert!(err.to_string().contains("Unknown style: typo"));
    }

    #[test]
    fn test_export_series_csv() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("beta.csv");
        let ts = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let series: Series = [(ts, 1.25)].into_iter().collect();

        export(Output::Series("rolling_beta", &series), &path, Format::Csv).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("open_ts,rolling_beta\n"));
        assert!(content.contains("2024-03-01T00:00:00Z,1.25"));
    }

    #[test]
    fn test_print_rejects_parquet() {
        let series = Series::default();
        assert!(print(Output::Series("beta", &series), Format::Parquet).is_err());
    }
}
