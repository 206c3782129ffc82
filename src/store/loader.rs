//! CSV loading and frame preparation for the climate store.
//!
//! The dataset is fixed for the process lifetime, so all parsing and dtype
//! normalization happens once here; query code downstream can assume a
//! `date` column of dtype Date and Float64 observation columns.

use crate::store::error::StoreError;
use polars::prelude::*;
use std::io;
use std::path::Path;
use tokio::{fs, task};
use tracing::info;

/// Columns every measurement file must carry. Extra columns are dropped.
const MEASUREMENT_COLUMNS: [&str; 4] = ["station", "date", "prcp", "tobs"];

/// Columns every station file must carry. Extra columns are dropped.
const STATION_COLUMNS: [&str; 2] = ["station", "name"];

/// Reads a headered CSV file into a DataFrame using a blocking task.
pub(crate) async fn read_csv(path: &Path) -> Result<DataFrame, StoreError> {
    match fs::metadata(path).await {
        Ok(_) => {}
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return Err(StoreError::MissingDataFile(path.to_path_buf()));
        }
        Err(e) => return Err(StoreError::FileRead(path.to_path_buf(), e)),
    }

    let path_buf = path.to_path_buf();
    let df = task::spawn_blocking(move || {
        CsvReadOptions::default()
            .with_has_header(true)
            .try_into_reader_with_file_path(Some(path_buf.clone()))
            .map_err(|e| StoreError::CsvRead(path_buf.clone(), e))?
            .finish()
            .map_err(|e| StoreError::CsvRead(path_buf, e))
    })
    .await??;

    info!(path = %path.display(), rows = df.height(), "loaded data file");
    Ok(df)
}

/// Validates and normalizes the measurement table.
///
/// The `date` column is parsed from ISO-8601 strings into the Date dtype so
/// range filters compare typed dates rather than strings. Parsing is strict;
/// a malformed row fails the load rather than surfacing later mid-query.
pub(crate) fn prepare_measurements(df: DataFrame) -> Result<LazyFrame, StoreError> {
    require_columns(&df, "measurements", &MEASUREMENT_COLUMNS)?;
    if df.height() == 0 {
        return Err(StoreError::EmptyTable("measurements"));
    }

    let prepared = df
        .lazy()
        .select([
            col("station").cast(DataType::String),
            col("date").str().to_date(StrptimeOptions {
                format: Some("%Y-%m-%d".into()),
                ..Default::default()
            }),
            col("prcp").cast(DataType::Float64),
            col("tobs").cast(DataType::Float64),
        ])
        .collect()
        .map_err(|e| StoreError::FramePreparation {
            table: "measurements",
            source: e,
        })?;

    Ok(prepared.lazy())
}

/// Validates and normalizes the station table.
pub(crate) fn prepare_stations(df: DataFrame) -> Result<LazyFrame, StoreError> {
    require_columns(&df, "stations", &STATION_COLUMNS)?;

    let prepared = df
        .lazy()
        .select([
            col("station").cast(DataType::String),
            col("name").cast(DataType::String),
        ])
        .collect()
        .map_err(|e| StoreError::FramePreparation {
            table: "stations",
            source: e,
        })?;

    Ok(prepared.lazy())
}

fn require_columns(
    df: &DataFrame,
    table: &'static str,
    columns: &[&'static str],
) -> Result<(), StoreError> {
    for column in columns {
        if df.column(column).is_err() {
            return Err(StoreError::MissingColumn { table, column });
        }
    }
    Ok(())
}
