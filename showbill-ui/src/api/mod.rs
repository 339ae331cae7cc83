//! HTTP API handlers for showbill-ui

pub mod artists;
pub mod health;
pub mod shows;
pub mod ui;
pub mod venues;

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Fallback handler: routing misses map to a generic 404 body
pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
        })),
    )
}
