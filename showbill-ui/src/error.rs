//! Handler-boundary error mapping
//!
//! Converts the common error taxonomy into HTTP responses with a JSON error
//! body. Database failures are logged here so write paths can stay terse.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use showbill_common::Error;

/// Error wrapper carrying a common [`Error`] across a handler boundary
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            Error::NotFound(what) => (StatusCode::NOT_FOUND, format!("Not found: {}", what)),
            Error::InvalidInput(what) => (StatusCode::BAD_REQUEST, format!("Invalid input: {}", what)),
            other => {
                tracing::error!("request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
