//! Show HTTP handlers

use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::db::shows::{self, ShowForm, ShowListing};
use crate::error::ApiError;
use crate::AppState;

/// GET /shows
///
/// Every show joined with its artist and venue, one flattened row per show.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ShowListing>>, ApiError> {
    Ok(Json(shows::list_all(&state.db).await?))
}

/// GET /shows/create
///
/// Empty form field-set for the create page.
pub async fn create_form() -> Json<ShowForm> {
    Json(ShowForm::default())
}

/// POST /shows/create
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<ShowForm>,
) -> Result<Json<Value>, ApiError> {
    let show = shows::create(&state.db, &form).await?;
    Ok(Json(json!({
        "id": show.guid,
        "message": "Show was successfully listed!",
    })))
}
