use polars::error::PolarsError;
use thiserror::Error;

/// Errors produced by the query service.
///
/// The date-validation variants render the exact user-facing messages,
/// including the dataset's min/max date hint, so the HTTP adapter can emit
/// their `Display` output verbatim.
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Date {date} not valid. Date Range is {min} to {max}")]
    DateNotFound {
        date: String,
        min: String,
        max: String,
    },

    #[error("Start Date {start} not valid. Date Range is {min} to {max}")]
    StartDateNotFound {
        start: String,
        min: String,
        max: String,
    },

    #[error("End Date {end} not valid. Date Range is {min} to {max}")]
    EndDateNotFound {
        end: String,
        min: String,
        max: String,
    },

    #[error("Start {start} and End Date {end} not valid. Date Range is {min} to {max}")]
    RangeNotFound {
        start: String,
        end: String,
        min: String,
        max: String,
    },

    #[error("No measurements between {start} and {end}")]
    EmptyRange { start: String, end: String },

    #[error("Measurement set is empty")]
    EmptyDataset,

    #[error("Failed evaluating query: {0}")]
    Frame(#[from] PolarsError),
}

impl QueryError {
    /// True when the error was caused by the request and should surface as
    /// a 404; false for internal faults.
    pub fn is_not_found(&self) -> bool {
        !matches!(self, QueryError::Frame(_) | QueryError::EmptyDataset)
    }
}
