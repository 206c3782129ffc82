//! HTTP adapter: maps the five URL patterns onto the query service and
//! serializes results to JSON.

pub mod error;
mod handlers;

use crate::queries::service::ClimateService;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;

/// Builds the API router. Static segments win over the `:start` capture,
/// so the three named endpoints are never shadowed by the date routes.
pub fn router(service: Arc<ClimateService>) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/v1.0/precipitation", get(handlers::precipitation))
        .route("/api/v1.0/stations", get(handlers::stations))
        .route("/api/v1.0/tobs", get(handlers::tobs))
        .route("/api/v1.0/:start", get(handlers::stats_from_start))
        .route("/api/v1.0/:start/:end", get(handlers::stats_between))
        .with_state(service)
}
