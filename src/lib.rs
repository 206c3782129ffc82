//! Read-only HTTP API over a fixed weather-observation dataset.
//!
//! Three layers, each behind its own module:
//!
//! * [`ClimateStore`] — the data source: station metadata and daily
//!   measurements held as immutable Polars lazy frames.
//! * [`ClimateService`] — the query service: five fixed query shapes
//!   (precipitation listing, station names, most-active-station
//!   temperatures, and the one- and two-bound date-range statistics).
//! * [`router`] — the axum HTTP adapter serializing results to JSON.

mod error;
mod http;
mod queries;
mod store;
mod types;

pub use error::ClimateApiError;
pub use http::router;
pub use queries::error::QueryError;
pub use queries::service::ClimateService;
pub use store::error::StoreError;
pub use store::ClimateStore;
pub use types::records::{PrecipitationRecord, TobsRecord};
