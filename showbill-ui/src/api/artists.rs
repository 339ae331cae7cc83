//! Artist HTTP handlers

use axum::{
    extract::{Path, State},
    response::Redirect,
    Json,
};
use serde_json::{json, Value};

use showbill_common::time;

use crate::api::venues::SearchRequest;
use crate::db::artists::{self, ArtistDetail, ArtistForm, ArtistRef};
use crate::db::SearchResults;
use crate::error::ApiError;
use crate::AppState;

/// GET /artists
///
/// Flat `{id, name}` listing of every artist.
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ArtistRef>>, ApiError> {
    Ok(Json(artists::list(&state.db).await?))
}

/// POST /artists/search
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResults>, ApiError> {
    let now = time::now();
    Ok(Json(artists::search(&state.db, &req.search_term, now).await?))
}

/// GET /artists/:id
///
/// Artist detail with past/upcoming show partition; 404 if absent.
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArtistDetail>, ApiError> {
    let now = time::now();
    Ok(Json(artists::get_detail(&state.db, &id, now).await?))
}

/// GET /artists/create
///
/// Empty form field-set for the create page.
pub async fn create_form() -> Json<ArtistForm> {
    Json(ArtistForm::default())
}

/// POST /artists/create
pub async fn create(
    State(state): State<AppState>,
    Json(form): Json<ArtistForm>,
) -> Result<Json<Value>, ApiError> {
    let id = artists::create(&state.db, &form).await?;
    Ok(Json(json!({
        "id": id,
        "message": format!("Artist {} was successfully listed!", form.name.trim()),
    })))
}

/// GET /artists/:id/edit
///
/// Current record as form values; 404 if absent.
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ArtistForm>, ApiError> {
    Ok(Json(artists::get_form(&state.db, &id).await?))
}

/// POST /artists/:id/edit
///
/// Full-replace edit, then redirect to the detail view.
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(form): Json<ArtistForm>,
) -> Result<Redirect, ApiError> {
    artists::update(&state.db, &id, &form).await?;
    Ok(Redirect::to(&format!("/artists/{}", id)))
}
