//! showbill-ui library - booking directory routes and state

use axum::Router;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod db;
pub mod error;

/// Application state shared across HTTP handlers
///
/// The pool is the only shared resource; handlers clone the state and scope
/// connections (or transactions) to a single request.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        // Static shell
        .route("/", get(api::ui::serve_index))
        .route("/static/app.js", get(api::ui::serve_app_js))
        .route("/health", get(api::health::health_check))
        // Venues
        .route("/venues", get(api::venues::list))
        .route("/venues/search", post(api::venues::search))
        .route(
            "/venues/create",
            get(api::venues::create_form).post(api::venues::create),
        )
        .route(
            "/venues/:id",
            get(api::venues::detail).delete(api::venues::delete),
        )
        .route(
            "/venues/:id/edit",
            get(api::venues::edit_form).post(api::venues::edit),
        )
        // Artists
        .route("/artists", get(api::artists::list))
        .route("/artists/search", post(api::artists::search))
        .route(
            "/artists/create",
            get(api::artists::create_form).post(api::artists::create),
        )
        .route("/artists/:id", get(api::artists::detail))
        .route(
            "/artists/:id/edit",
            get(api::artists::edit_form).post(api::artists::edit),
        )
        // Shows
        .route("/shows", get(api::shows::list))
        .route(
            "/shows/create",
            get(api::shows::create_form).post(api::shows::create),
        )
        // Routing misses map to a generic 404 body
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
