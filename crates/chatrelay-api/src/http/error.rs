//! Mapping from relay errors to HTTP responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use chatrelay_types::error::RelayError;

/// Wrapper making [`RelayError`] usable as an axum rejection.
///
/// The body is always `{"error": message}`; the status follows the error
/// kind. Messages are the typed errors' own display strings, never raw
/// library errors.
#[derive(Debug)]
pub struct AppError(pub RelayError);

impl From<RelayError> for AppError {
    fn from(e: RelayError) -> Self {
        AppError(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            RelayError::Input(_) => StatusCode::BAD_REQUEST,
            RelayError::Auth(_) => StatusCode::UNAUTHORIZED,
            RelayError::NotFound(_) => StatusCode::NOT_FOUND,
            RelayError::Upstream(_) => StatusCode::BAD_GATEWAY,
        };

        if status == StatusCode::BAD_GATEWAY {
            tracing::error!(error = %self.0, "upstream failure");
        } else {
            tracing::debug!(error = %self.0, status = %status, "request rejected");
        }

        (status, axum::Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
