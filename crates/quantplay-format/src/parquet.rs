//! Apache Parquet storage format.

use arrow::array::{
    Array, ArrayRef, AsArray, Float64Array, StringArray, TimestampMicrosecondArray,
};
use arrow::compute::cast;
use arrow::datatypes::{
    DataType, Field, Float64Type, Schema, TimeUnit, TimestampMicrosecondType,
};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use parquet::arrow::ArrowWriter;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;
use parquet::file::reader::ChunkReader;
use quantplay_types::{OhlcvBar, OhlcvTable, ReturnMatrix, Series};
use std::io::Write;
use std::sync::Arc;

use crate::{FormatError, Formatter};

/// Columns every OHLCV file must carry.
const REQUIRED_COLUMNS: [&str; 6] = ["open_ts", "interval", "open", "high", "low", "close"];

/// Optional volume column.
const VOLUME_COLUMN: &str = "volume";

fn parquet_err(e: impl std::fmt::Display) -> FormatError {
    FormatError::Parquet(e.to_string())
}

/// UTC microsecond timestamp type used for every written `open_ts`.
fn utc_micros() -> DataType {
    DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into()))
}

/// Parquet formatter.
#[derive(Debug, Clone)]
pub struct ParquetFormatter {
    /// Row group size (number of rows per group).
    row_group_size: usize,
    /// Compression codec.
    compression: Compression,
}

impl Default for ParquetFormatter {
    fn default() -> Self {
        Self {
            row_group_size: 100_000,
            compression: Compression::SNAPPY,
        }
    }
}

impl ParquetFormatter {
    /// Creates a new Parquet formatter with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the row group size.
    #[must_use]
    pub const fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    /// Sets the compression codec.
    #[must_use]
    pub const fn with_compression(mut self, compression: Compression) -> Self {
        self.compression = compression;
        self
    }

    /// Creates the Arrow schema for OHLCV data.
    fn ohlcv_schema() -> Schema {
        Schema::new(vec![
            Field::new("open_ts", utc_micros(), false),
            Field::new("interval", DataType::Utf8, false),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, false),
            Field::new(VOLUME_COLUMN, DataType::Float64, true),
        ])
    }

    /// Creates the Arrow schema for a timestamp column followed by values.
    fn value_schema<'a>(names: impl Iterator<Item = &'a str>) -> Schema {
        let mut fields = vec![Field::new("open_ts", utc_micros(), false)];
        fields.extend(names.map(|name| Field::new(name, DataType::Float64, true)));
        Schema::new(fields)
    }

    /// Converts OHLCV bars to an Arrow RecordBatch.
    fn ohlcv_to_batch(
        schema: &Arc<Schema>,
        bars: &[OhlcvBar],
    ) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = bars.iter().map(|b| b.open_ts.timestamp_micros()).collect();
        let intervals: Vec<_> = bars.iter().map(|b| b.interval.as_str()).collect();
        let opens: Vec<_> = bars.iter().map(|b| b.open).collect();
        let highs: Vec<_> = bars.iter().map(|b| b.high).collect();
        let lows: Vec<_> = bars.iter().map(|b| b.low).collect();
        let closes: Vec<_> = bars.iter().map(|b| b.close).collect();
        let volumes: Vec<_> = bars.iter().map(|b| b.volume).collect();

        RecordBatch::try_new(
            Arc::clone(schema),
            vec![
                Arc::new(TimestampMicrosecondArray::from(timestamps).with_timezone("UTC")),
                Arc::new(StringArray::from(intervals)),
                Arc::new(Float64Array::from(opens)),
                Arc::new(Float64Array::from(highs)),
                Arc::new(Float64Array::from(lows)),
                Arc::new(Float64Array::from(closes)),
                Arc::new(Float64Array::from(volumes)),
            ],
        )
        .map_err(parquet_err)
    }

    /// Converts timestamped value columns to an Arrow RecordBatch.
    fn values_to_batch(
        schema: &Arc<Schema>,
        index: &[DateTime<Utc>],
        columns: Vec<Vec<f64>>,
    ) -> Result<RecordBatch, FormatError> {
        let timestamps: Vec<_> = index.iter().map(DateTime::timestamp_micros).collect();
        let mut arrays: Vec<ArrayRef> = vec![Arc::new(
            TimestampMicrosecondArray::from(timestamps).with_timezone("UTC"),
        )];
        arrays.extend(
            columns
                .into_iter()
                .map(|values| Arc::new(Float64Array::from(values)) as ArrayRef),
        );
        RecordBatch::try_new(Arc::clone(schema), arrays).map_err(parquet_err)
    }

    /// Opens an Arrow writer with the configured properties.
    fn arrow_writer<W: Write + Send>(
        &self,
        schema: Arc<Schema>,
        writer: W,
    ) -> Result<ArrowWriter<W>, FormatError> {
        let props = WriterProperties::builder()
            .set_compression(self.compression)
            .set_max_row_group_size(self.row_group_size)
            .build();
        ArrowWriter::try_new(writer, schema, Some(props)).map_err(parquet_err)
    }
}

impl Formatter for ParquetFormatter {
    fn write_ohlcv<W: Write + Send>(
        &self,
        table: &OhlcvTable,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::ohlcv_schema());
        let mut arrow_writer = self.arrow_writer(Arc::clone(&schema), writer)?;

        // Write in batches
        for chunk in table.bars().chunks(self.row_group_size) {
            let batch = Self::ohlcv_to_batch(&schema, chunk)?;
            arrow_writer.write(&batch).map_err(parquet_err)?;
        }

        arrow_writer.close().map_err(parquet_err)?;
        Ok(())
    }

    fn write_returns<W: Write + Send>(
        &self,
        matrix: &ReturnMatrix,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::value_schema(
            matrix.symbols().iter().map(|s| s.as_str()),
        ));
        let mut arrow_writer = self.arrow_writer(Arc::clone(&schema), writer)?;

        let columns = (0..matrix.ncols())
            .map(|col| matrix.iter_rows().map(|(_, row)| row[col]).collect())
            .collect();
        let batch = Self::values_to_batch(&schema, matrix.index(), columns)?;
        arrow_writer.write(&batch).map_err(parquet_err)?;

        arrow_writer.close().map_err(parquet_err)?;
        Ok(())
    }

    fn write_series<W: Write + Send>(
        &self,
        name: &str,
        series: &Series,
        writer: W,
    ) -> Result<(), FormatError> {
        let schema = Arc::new(Self::value_schema(std::iter::once(name)));
        let mut arrow_writer = self.arrow_writer(Arc::clone(&schema), writer)?;

        let batch = Self::values_to_batch(&schema, &series.index(), vec![series.values()])?;
        arrow_writer.write(&batch).map_err(parquet_err)?;

        arrow_writer.close().map_err(parquet_err)?;
        Ok(())
    }

    fn extension(&self) -> &str {
        "parquet"
    }
}

/// Reads OHLCV tables from Parquet files.
///
/// Accepts `open_ts` as any Arrow timestamp, a date, or integer epoch
/// milliseconds; `interval` as plain or dictionary-encoded strings; prices
/// as any numeric type. Null prices read as `NaN`.
#[derive(Debug, Clone)]
pub struct ParquetReader {
    /// Number of rows decoded per record batch.
    batch_size: usize,
}

impl Default for ParquetReader {
    fn default() -> Self {
        Self { batch_size: 8192 }
    }
}

impl ParquetReader {
    /// Creates a new reader with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decode batch size.
    #[must_use]
    pub const fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Reads the whole table, rows in file order.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::MissingColumn`] if a required column is absent,
    /// or a Parquet error if the file cannot be decoded.
    pub fn read_ohlcv<R: ChunkReader + 'static>(
        &self,
        reader: R,
    ) -> Result<OhlcvTable, FormatError> {
        let builder = ParquetRecordBatchReaderBuilder::try_new(reader).map_err(parquet_err)?;

        let schema = Arc::clone(builder.schema());
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|name| schema.column_with_name(name).is_none())
        {
            return Err(FormatError::MissingColumn((*missing).to_string()));
        }

        let batches = builder
            .with_batch_size(self.batch_size)
            .build()
            .map_err(parquet_err)?;

        let mut bars = Vec::new();
        for batch in batches {
            let batch = batch.map_err(parquet_err)?;
            Self::batch_to_bars(&batch, &mut bars)?;
        }
        Ok(OhlcvTable::new(bars))
    }

    /// Appends the rows of one batch to `bars`.
    fn batch_to_bars(batch: &RecordBatch, bars: &mut Vec<OhlcvBar>) -> Result<(), FormatError> {
        let open_ts = timestamp_column(batch, "open_ts")?;
        let intervals = cast(column(batch, "interval")?, &DataType::Utf8).map_err(parquet_err)?;
        let intervals = intervals.as_string::<i32>();
        let open = float_column(batch, "open")?;
        let high = float_column(batch, "high")?;
        let low = float_column(batch, "low")?;
        let close = float_column(batch, "close")?;
        let volume = match batch.column_by_name(VOLUME_COLUMN) {
            Some(_) => Some(float_column(batch, VOLUME_COLUMN)?),
            None => None,
        };

        let offset = bars.len();
        bars.reserve(batch.num_rows());
        for row in 0..batch.num_rows() {
            let ts = open_ts
                .is_valid(row)
                .then(|| DateTime::from_timestamp_micros(open_ts.value(row)))
                .flatten()
                .ok_or(FormatError::InvalidValue {
                    column: "open_ts",
                    row: offset + row,
                })?;
            let interval = if intervals.is_valid(row) {
                intervals.value(row)
            } else {
                ""
            };
            bars.push(OhlcvBar::new(
                ts,
                interval,
                value_or_nan(&open, row),
                value_or_nan(&high, row),
                value_or_nan(&low, row),
                value_or_nan(&close, row),
                volume
                    .as_ref()
                    .and_then(|v| v.is_valid(row).then(|| v.value(row))),
            ));
        }
        Ok(())
    }
}

fn column<'a>(batch: &'a RecordBatch, name: &str) -> Result<&'a ArrayRef, FormatError> {
    batch
        .column_by_name(name)
        .ok_or_else(|| FormatError::MissingColumn(name.to_string()))
}

fn float_column(batch: &RecordBatch, name: &str) -> Result<Float64Array, FormatError> {
    let array = cast(column(batch, name)?, &DataType::Float64).map_err(parquet_err)?;
    Ok(array.as_primitive::<Float64Type>().clone())
}

/// Normalizes any supported timestamp encoding to UTC microseconds.
fn timestamp_column(
    batch: &RecordBatch,
    name: &str,
) -> Result<TimestampMicrosecondArray, FormatError> {
    let array = column(batch, name)?;
    let array = if array.data_type().is_integer() {
        let millis = cast(array, &DataType::Int64).map_err(parquet_err)?;
        cast(&millis, &DataType::Timestamp(TimeUnit::Millisecond, None)).map_err(parquet_err)?
    } else {
        Arc::clone(array)
    };
    let array = cast(&array, &utc_micros()).map_err(parquet_err)?;
    Ok(array.as_primitive::<TimestampMicrosecondType>().clone())
}

fn value_or_nan(array: &Float64Array, row: usize) -> f64 {
    if array.is_valid(row) {
        array.value(row)
    } else {
        f64::NAN
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::{DictionaryArray, Int64Array};
    use arrow::datatypes::Int32Type;
    use chrono::TimeZone;
    use quantplay_types::Symbol;
    use std::fs::File;
    use std::io::Cursor;
    use tempfile::TempDir;

    fn ts(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 15, hour, 0, 0).unwrap()
    }

    fn create_test_table() -> OhlcvTable {
        OhlcvTable::new(vec![
            OhlcvBar::new(ts(12), "1h", 100.0, 101.5, 99.5, 101.0, Some(42.0)),
            OhlcvBar::new(ts(0), "1d", 95.0, 102.0, 94.0, 100.0, None),
            OhlcvBar::new(ts(13), "1h", 101.0, 102.0, 100.0, 100.5, Some(7.0)),
        ])
    }

    fn write_batch(path: &std::path::Path, batch: &RecordBatch) {
        let file = File::create(path).unwrap();
        let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
        writer.write(batch).unwrap();
        writer.close().unwrap();
    }

    #[test]
    fn test_parquet_magic_bytes() {
        let formatter = ParquetFormatter::new();
        let mut output = Cursor::new(Vec::new());

        formatter
            .write_ohlcv(&create_test_table(), &mut output)
            .unwrap();

        // Parquet files start with "PAR1" magic bytes
        let data = output.into_inner();
        assert!(data.len() > 4);
        assert_eq!(&data[0..4], b"PAR1");
    }

    #[test]
    fn test_write_then_read_preserves_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("BTCUSDT.parquet");
        let table = create_test_table();

        ParquetFormatter::new()
            .with_row_group_size(2)
            .write_ohlcv(&table, File::create(&path).unwrap())
            .unwrap();
        let read = ParquetReader::new()
            .with_batch_size(1)
            .read_ohlcv(File::open(&path).unwrap())
            .unwrap();

        assert_eq!(read, table);
    }

    #[test]
    fn test_missing_column_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("BADUSDT.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("open_ts", DataType::Int64, false),
            Field::new("interval", DataType::Utf8, false),
            Field::new("close", DataType::Float64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![0_i64])),
                Arc::new(StringArray::from(vec!["1h"])),
                Arc::new(Float64Array::from(vec![1.0])),
            ],
        )
        .unwrap();
        write_batch(&path, &batch);

        let err = ParquetReader::new()
            .read_ohlcv(File::open(&path).unwrap())
            .unwrap_err();
        assert!(matches!(err, FormatError::MissingColumn(ref c) if c == "open"));
    }

    #[test]
    fn test_reads_epoch_millis_and_categorical_interval() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ETHUSDT.parquet");
        let millis = ts(12).timestamp_millis();
        let intervals: DictionaryArray<Int32Type> = vec!["1h", "1h"].into_iter().collect();
        let schema = Arc::new(Schema::new(vec![
            Field::new("open_ts", DataType::Int64, false),
            Field::new("interval", intervals.data_type().clone(), false),
            Field::new("open", DataType::Float64, false),
            Field::new("high", DataType::Float64, false),
            Field::new("low", DataType::Float64, false),
            Field::new("close", DataType::Float64, true),
        ]));
        let batch = RecordBatch::try_new(
            schema,
            vec![
                Arc::new(Int64Array::from(vec![millis, millis + 3_600_000])),
                Arc::new(intervals),
                Arc::new(Float64Array::from(vec![1.0, 2.0])),
                Arc::new(Float64Array::from(vec![1.5, 2.5])),
                Arc::new(Float64Array::from(vec![0.5, 1.5])),
                Arc::new(Float64Array::from(vec![Some(1.25), None])),
            ],
        )
        .unwrap();
        write_batch(&path, &batch);

        let table = ParquetReader::new()
            .read_ohlcv(File::open(&path).unwrap())
            .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.bars()[0].open_ts, ts(12));
        assert_eq!(table.bars()[1].open_ts, ts(13));
        assert_eq!(table.bars()[1].interval, "1h");
        assert!(table.bars()[1].close.is_nan());
        assert!(table.bars()[0].volume.is_none());
    }

    #[test]
    fn test_returns_schema() {
        let matrix = ReturnMatrix::outer_merge([
            (
                Symbol::from("AAAUSDT"),
                [(ts(1), 0.5), (ts(2), 0.25)].into_iter().collect(),
            ),
            (
                Symbol::from("BBBUSDT"),
                [(ts(1), -0.5), (ts(2), 0.75)].into_iter().collect(),
            ),
        ]);
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("returns.parquet");

        ParquetFormatter::new()
            .write_returns(&matrix, File::create(&path).unwrap())
            .unwrap();

        let builder =
            ParquetRecordBatchReaderBuilder::try_new(File::open(&path).unwrap()).unwrap();
        let schema = builder.schema();
        assert_eq!(schema.fields().len(), 3);
        assert!(schema.field_with_name("AAAUSDT").is_ok());
        assert_eq!(builder.metadata().file_metadata().num_rows(), 2);
    }
}
