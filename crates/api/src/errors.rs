use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ferrous_dyndns_domain::DomainError;
use serde_json::json;
use tracing::error;

/// Failure the DynDNS2 grammar has no return code for.
///
/// Credential mismatches never get here: the reconciler answers them in
/// the response body, so every `ApiError` is a server-side failure.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "Request failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "internal error" })),
        )
            .into_response()
    }
}
