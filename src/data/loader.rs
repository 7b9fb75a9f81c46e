use std::collections::BTreeSet;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Array, ArrayRef, StringArray};
use arrow::compute::{can_cast_types, cast};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::error::CatalogError;
use super::model::{Catalog, Column, RawRow};
use super::popularity::PopularityRule;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a catalog from a file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the catalog column names (recommended)
/// * `.json`    – `[{ "title": ..., "type": ..., ... }, ...]`
/// * `.parquet` – string / integer / date columns named like the CSV headers
pub fn load_file(path: &Path) -> Result<Catalog> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let (columns, rows) = match ext.as_str() {
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            read_csv(file)?
        }
        "json" => read_json(&std::fs::read_to_string(path).context("reading JSON file")?)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(CatalogError::UnsupportedExtension(other.to_string()).into()),
    };

    build_catalog(columns, rows)
}

/// Load a CSV catalog from any reader (uploads, tests).
pub fn load_csv_reader<R: Read>(reader: R) -> Result<Catalog> {
    let (columns, rows) = read_csv(reader)?;
    build_catalog(columns, rows)
}

/// Load a records-oriented JSON catalog from text.
pub fn load_json_str(text: &str) -> Result<Catalog> {
    let (columns, rows) = read_json(text)?;
    build_catalog(columns, rows)
}

fn build_catalog(columns: BTreeSet<Column>, rows: Vec<RawRow>) -> Result<Catalog> {
    let catalog = Catalog::from_rows(columns, &rows, &PopularityRule::default())?;

    let absent: Vec<&str> = Column::ALL
        .iter()
        .filter(|c| !catalog.has(**c))
        .map(|c| c.name())
        .collect();
    if !absent.is_empty() {
        log::warn!("Catalog has no {absent:?} column(s); dependent charts are skipped");
    }
    Ok(catalog)
}

/// Store a cell unless it is empty. Surrounding whitespace is kept, so a
/// padded country is a different value from the bare one; the parsers for
/// dates, years and durations trim on their own.
fn put(row: &mut RawRow, column: Column, value: &str) {
    if !value.is_empty() {
        row.insert(column, value.to_string());
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row with column names, any order. Unknown columns are
/// ignored and records that cannot be read are skipped with a warning.
fn read_csv<R: Read>(reader: R) -> Result<(BTreeSet<Column>, Vec<RawRow>)> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let header_map: Vec<(usize, Column)> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .enumerate()
        .filter_map(|(i, h)| Column::from_header(h).map(|c| (i, c)))
        .collect();
    let columns: BTreeSet<Column> = header_map.iter().map(|(_, c)| *c).collect();

    let mut rows = Vec::new();
    let mut skipped = 0usize;

    for (row_no, result) in reader.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Skipping CSV row {row_no}: {e}");
                skipped += 1;
                continue;
            }
        };

        let mut row = RawRow::new();
        for (idx, column) in &header_map {
            if let Some(value) = record.get(*idx) {
                put(&mut row, *column, value);
            }
        }
        rows.push(row);
    }

    if skipped > 0 {
        log::warn!("{skipped} unreadable CSV row(s) skipped");
    }
    Ok((columns, rows))
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "title": "Dick Johnson Is Dead", "type": "Movie", "release_year": 2020, ... },
///   ...
/// ]
/// ```
///
/// The column set is the union of keys across all records.
fn read_json(text: &str) -> Result<(BTreeSet<Column>, Vec<RawRow>)> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;
    let records = root.as_array().ok_or(CatalogError::NotRecordArray)?;

    let mut columns = BTreeSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let mut row = RawRow::new();
        for (key, val) in obj {
            let Some(column) = Column::from_header(key) else {
                continue;
            };
            columns.insert(column);
            if let Some(text) = json_cell(val) {
                put(&mut row, column, &text);
            }
        }
        rows.push(row);
    }

    Ok((columns, rows))
}

fn json_cell(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        JsonValue::Null => None,
        other => Some(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet catalog as written by Pandas (`df.to_parquet()`), Polars
/// or the `generate_sample` binary.
///
/// Every mapped column is cast to Utf8 and fed through the same text path as
/// CSV. Timestamps and Date64 are truncated to a Date32 first so
/// `date_added` comes out as `YYYY-MM-DD`. A column whose type cannot be
/// cast is dropped with one warning and treated as absent from the file.
fn read_parquet(path: &Path) -> Result<(BTreeSet<Column>, Vec<RawRow>)> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let mut mapped: Vec<(usize, Column)> = Vec::new();
    for (i, field) in builder.schema().fields().iter().enumerate() {
        let Some(column) = Column::from_header(field.name()) else {
            continue;
        };
        if castable_to_text(field.data_type()) {
            mapped.push((i, column));
        } else {
            log::warn!(
                "Parquet column '{}' has unsupported type {:?}; ignored",
                field.name(),
                field.data_type()
            );
        }
    }
    let columns: BTreeSet<Column> = mapped.iter().map(|(_, c)| *c).collect();

    let reader = builder.build().context("building parquet reader")?;
    let mut rows = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let texts: Vec<(Column, StringArray)> = mapped
            .iter()
            .map(|(col_idx, column)| {
                column_as_text(batch.column(*col_idx))
                    .with_context(|| format!("converting parquet column '{column}'"))
                    .map(|text| (*column, text))
            })
            .collect::<Result<_>>()?;

        for row_idx in 0..batch.num_rows() {
            let mut row = RawRow::new();
            for (column, text) in &texts {
                if text.is_valid(row_idx) {
                    put(&mut row, *column, text.value(row_idx));
                }
            }
            rows.push(row);
        }
    }

    Ok((columns, rows))
}

fn castable_to_text(data_type: &DataType) -> bool {
    match data_type {
        DataType::Timestamp(_, _) | DataType::Date64 => true,
        other => can_cast_types(other, &DataType::Utf8),
    }
}

/// Cast one Arrow column to a Utf8 array; nulls stay null.
fn column_as_text(col: &ArrayRef) -> Result<StringArray> {
    let col = match col.data_type() {
        DataType::Timestamp(_, _) | DataType::Date64 => cast(col.as_ref(), &DataType::Date32)?,
        _ => Arc::clone(col),
    };
    let text = cast(col.as_ref(), &DataType::Utf8)?;
    text.as_any()
        .downcast_ref::<StringArray>()
        .cloned()
        .context("Utf8 cast did not produce a string array")
}
