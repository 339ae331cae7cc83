//! Venue HTTP handlers

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use showbill_common::time;

use crate::db::venues::{self, AreaVenues, VenueDetail, VenueForm};
use crate::db::SearchResults;
use crate::error::ApiError;
use crate::AppState;

/// Search request body: the `search_term` form field
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub search_term: String,
}

/// GET /venues
///
/// Venues grouped by (city, state) area, each annotated with its upcoming
/// show count.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<AreaVenues>>, ApiError> {
    let now = time::now();
    Ok(Json(venues::list_by_area(&state.db, now).await?))
}

/// POST /venues/search
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResults>, ApiError> {
    let now = time::now();
    Ok(Json(venues::search(&state.db, &req.search_term, now).await?))
}

/// GET /venues/:id
///
/// Venue detail with past/upcoming show partition; 404 if absent.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VenueDetail>, ApiError> {
    let now = time::now();
    Ok(Json(venues::get_detail(&state.db, &id, now).await?))
}

/// GET /venues/create
///
/// Empty form field-set for the create page.
pub async fn create_form() -> Json<VenueForm> {
    Json(VenueForm::default())
}

/// POST /venues/create
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<VenueForm>,
) -> Result<Json<Value>, ApiError> {
    let id = venues::create(&state.db, &form).await?;
    Ok(Json(json!({
        "id": id,
        "message": format!("Venue {} was successfully listed!", form.name.trim()),
    })))
}

/// DELETE /venues/:id
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    venues::delete(&state.db, &id).await?;
    Ok(Json(json!({
        "message": format!("Venue {} was successfully deleted.", id),
    })))
}

/// GET /venues/:id/edit
///
/// Current record as form values; 404 if absent.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<VenueForm>, ApiError> {
    Ok(Json(venues::get_form(&state.db, &id).await?))
}

/// POST /venues/:id/edit
///
/// Full-replace edit, then redirect to the detail view.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<VenueForm>,
) -> Result<Redirect, ApiError> {
    venues::update(&state.db, &id, &form).await?;
    Ok(Redirect::to(&format!("/venues/{}", id)))
}
