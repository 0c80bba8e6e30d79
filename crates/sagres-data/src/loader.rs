//! Table loading at the I/O boundary.
//!
//! Statement and price tables arrive as CSV or Parquet files produced by the
//! upstream ingestion jobs. Everything past this module works on typed
//! stores; nothing in the metric or strategy layers touches the filesystem.

use std::fs::File;
use std::path::Path;

use chrono::NaiveDate;
use polars::prelude::*;
use sagres_traits::{Date, Result, SagresError};
use tracing::info;

/// Read a CSV or Parquet table into a DataFrame.
///
/// The format is chosen from the file extension: `.csv` for CSV, and
/// `.parquet`, `.pq` or `.gzip` (the upstream `*.parquet.gzip` naming) for
/// Parquet.
pub fn read_table(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let df = match extension.as_deref() {
        Some("csv") => CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(10_000))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))?
            .finish()?,
        Some("parquet" | "pq" | "gzip") => ParquetReader::new(File::open(path)?).finish()?,
        _ => {
            return Err(SagresError::InvalidData(format!(
                "Unsupported table format: {}",
                path.display()
            )));
        }
    };

    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        "read table"
    );
    Ok(df)
}

/// Parse a date in `YYYY-MM-DD` or `YYYYMMDD` form.
///
/// Timestamps are accepted as long as they start with a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> Result<Date> {
    let value = value.trim();
    let parsed = if value.len() == 8 && value.bytes().all(|b| b.is_ascii_digit()) {
        NaiveDate::parse_from_str(value, "%Y%m%d")
    } else {
        NaiveDate::parse_from_str(value.get(..10).unwrap_or(value), "%Y-%m-%d")
    };
    parsed.map_err(|e| SagresError::InvalidDate(format!("'{value}': {e}")))
}

/// First of `candidates` present in the frame.
pub(crate) fn find_column<'a>(df: &DataFrame, candidates: &[&'a str]) -> Option<&'a str> {
    let names = df.get_column_names();
    candidates
        .iter()
        .copied()
        .find(|c| names.iter().any(|n| n.as_str() == *c))
}

/// A column cast to `f64`, with non-finite values mapped to `None`.
pub(crate) fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::Float64)?;
    Ok(series
        .f64()?
        .into_iter()
        .map(|v| v.filter(|v| v.is_finite()))
        .collect())
}

/// A column cast to strings.
pub(crate) fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>> {
    let series = df
        .column(name)?
        .as_materialized_series()
        .cast(&DataType::String)?;
    Ok(series
        .str()?
        .into_iter()
        .map(|v| v.map(str::to_string))
        .collect())
}
