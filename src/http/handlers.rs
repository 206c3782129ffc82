//! Thin axum handlers: parse path parameters, call the service, serialize.
//! All decision logic lives in [`ClimateService`].

use crate::http::error::ApiError;
use crate::queries::service::ClimateService;
use crate::types::records::{PrecipitationRecord, TobsRecord};
use axum::extract::{Path, State};
use axum::response::Html;
use axum::Json;
use std::sync::Arc;
use tracing::instrument;

/// Route listing served at `/`. The `<br/>` separators are part of the
/// historical plain-text/HTML response.
const AVAILABLE_ROUTES: &str = "Available Routes:<br/>\
/api/v1.0/precipitation<br/>\
/api/v1.0/stations<br/>\
/api/v1.0/tobs<br/>\
/api/v1.0/start (enter YYYY-MM-DD)<br/>\
/api/v1.0/start/end (enter YYYY-MM-DD/YYYY-MM-DD)";

#[instrument]
pub(super) async fn index() -> Html<&'static str> {
    Html(AVAILABLE_ROUTES)
}

#[instrument(skip(service))]
pub(super) async fn precipitation(
    State(service): State<Arc<ClimateService>>,
) -> Result<Json<Vec<PrecipitationRecord>>, ApiError> {
    Ok(Json(service.precipitation()?))
}

#[instrument(skip(service))]
pub(super) async fn stations(
    State(service): State<Arc<ClimateService>>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(service.stations()?))
}

#[instrument(skip(service))]
pub(super) async fn tobs(
    State(service): State<Arc<ClimateService>>,
) -> Result<Json<Vec<TobsRecord>>, ApiError> {
    Ok(Json(service.most_active_station_temperatures()?))
}

#[instrument(skip(service))]
pub(super) async fn stats_from_start(
    State(service): State<Arc<ClimateService>>,
    Path(start): Path<String>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(service.range_stats(&start)?))
}

#[instrument(skip(service))]
pub(super) async fn stats_between(
    State(service): State<Arc<ClimateService>>,
    Path((start, end)): Path<(String, String)>,
) -> Result<Json<Vec<String>>, ApiError> {
    Ok(Json(service.range_stats_between(&start, &end)?))
}
