use crate::queries::error::QueryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

/// Wraps a [`QueryError`] so handlers can return it with `?`.
///
/// Date-validation failures become a 404 with a `{"error": "..."}` body;
/// anything else indicates an internal fault and maps to a 500 with the
/// same body shape.
pub struct ApiError(QueryError);

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            error!(error = %self.0, "query evaluation failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
