//! The read-only data source: two pre-loaded tabular record sets.
//!
//! `ClimateStore` owns the measurement and station tables as Polars
//! `LazyFrame`s. Lazy plans are cheap `Arc`-backed clones, so every query
//! takes its own handle and the store itself carries no mutable state;
//! concurrent reads need no coordination.

pub mod error;
mod loader;

use crate::store::error::StoreError;
use polars::frame::DataFrame;
use polars::prelude::LazyFrame;
use std::path::Path;

/// File name of the measurement table inside the data directory.
const MEASUREMENTS_FILE: &str = "measurements.csv";

/// File name of the station table inside the data directory.
const STATIONS_FILE: &str = "stations.csv";

/// Immutable snapshot of the weather-observation dataset.
///
/// Constructed once at startup via [`ClimateStore::open`] (or
/// [`ClimateStore::from_frames`] for in-memory data) and shared for the
/// lifetime of the process. No operation on the store mutates it.
pub struct ClimateStore {
    measurements: LazyFrame,
    stations: LazyFrame,
}

impl std::fmt::Debug for ClimateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClimateStore").finish_non_exhaustive()
    }
}

impl ClimateStore {
    /// Opens the dataset from `measurements.csv` and `stations.csv` under
    /// `data_dir`.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] when a file is missing or unreadable, a
    /// required column is absent, a date fails to parse, or the measurement
    /// table is empty. These are startup-class failures: callers should
    /// abort rather than serve queries without a dataset.
    pub async fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let measurements = loader::read_csv(&data_dir.join(MEASUREMENTS_FILE)).await?;
        let stations = loader::read_csv(&data_dir.join(STATIONS_FILE)).await?;
        Self::from_frames(measurements, stations)
    }

    /// Builds a store from already-loaded frames.
    ///
    /// Applies the same validation and dtype normalization as [`open`]:
    /// the `date` column must hold ISO-8601 (`YYYY-MM-DD`) strings.
    ///
    /// [`open`]: ClimateStore::open
    pub fn from_frames(measurements: DataFrame, stations: DataFrame) -> Result<Self, StoreError> {
        Ok(Self {
            measurements: loader::prepare_measurements(measurements)?,
            stations: loader::prepare_stations(stations)?,
        })
    }

    /// A lazy handle on the measurement table (`station`, `date`, `prcp`, `tobs`).
    pub fn measurements(&self) -> LazyFrame {
        self.measurements.clone()
    }

    /// A lazy handle on the station table (`station`, `name`).
    pub fn stations(&self) -> LazyFrame {
        self.stations.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use polars::prelude::*;
    use std::io::Write;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut file = std::fs::File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[tokio::test]
    async fn open_loads_both_tables() -> Result<(), Box<dyn std::error::Error>> {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            "measurements.csv",
            "station,date,prcp,tobs\n\
             USC00519397,2017-08-22,0.0,70.0\n\
             USC00519397,2017-08-23,,75.5\n",
        );
        write_file(
            dir.path(),
            "stations.csv",
            "station,name\nUSC00519397,\"WAIKIKI 717.2, HI US\"\n",
        );

        let store = ClimateStore::open(dir.path()).await?;

        let measurements = store.measurements().collect()?;
        assert_eq!(measurements.height(), 2);
        assert_eq!(measurements.column("date").unwrap().dtype(), &DataType::Date);
        // Empty prcp field comes through as a null, not a parse failure.
        assert_eq!(measurements.column("prcp").unwrap().null_count(), 1);

        let stations = store.stations().collect()?;
        assert_eq!(stations.height(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn open_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClimateStore::open(dir.path()).await.unwrap_err();
        assert!(matches!(err, StoreError::MissingDataFile(_)));
    }

    #[test]
    fn from_frames_rejects_missing_column() {
        let measurements = df!(
            "station" => &["USC00519397"],
            "date" => &["2017-08-22"],
            // no prcp column
            "tobs" => &[70.0],
        )
        .unwrap();
        let stations = df!("station" => &["USC00519397"], "name" => &["WAIKIKI"]).unwrap();

        let err = ClimateStore::from_frames(measurements, stations).unwrap_err();
        assert!(matches!(
            err,
            StoreError::MissingColumn {
                table: "measurements",
                column: "prcp"
            }
        ));
    }

    #[test]
    fn from_frames_rejects_empty_measurements() {
        let measurements = df!(
            "station" => &[] as &[&str],
            "date" => &[] as &[&str],
            "prcp" => &[] as &[f64],
            "tobs" => &[] as &[f64],
        )
        .unwrap();
        let stations = df!("station" => &["USC00519397"], "name" => &["WAIKIKI"]).unwrap();

        let err = ClimateStore::from_frames(measurements, stations).unwrap_err();
        assert!(matches!(err, StoreError::EmptyTable("measurements")));
    }

    #[test]
    fn from_frames_rejects_malformed_dates() {
        let measurements = df!(
            "station" => &["USC00519397"],
            "date" => &["22-08-2017"],
            "prcp" => &[Some(0.0)],
            "tobs" => &[70.0],
        )
        .unwrap();
        let stations = df!("station" => &["USC00519397"], "name" => &["WAIKIKI"]).unwrap();

        let err = ClimateStore::from_frames(measurements, stations).unwrap_err();
        assert!(matches!(
            err,
            StoreError::FramePreparation {
                table: "measurements",
                ..
            }
        ));
    }
}
