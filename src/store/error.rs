use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Data file not found: '{0}'")]
    MissingDataFile(PathBuf),

    #[error("Failed to read data file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse CSV data from '{0}'")]
    CsvRead(PathBuf, #[source] PolarsError),

    #[error("Required column '{column}' missing from the {table} table")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },

    #[error("The {0} table contains no rows")]
    EmptyTable(&'static str),

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Failed preparing the {table} table: {source}")]
    FramePreparation {
        table: &'static str,
        #[source]
        source: PolarsError,
    },
}
