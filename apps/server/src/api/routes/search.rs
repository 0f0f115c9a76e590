//! Search API Routes

use crate::api::handlers::{options, search};
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};

pub fn search_routes() -> Router<AppState> {
    Router::new()
        .route("/api/search", get(search::search))
        .route(
            "/api/search/fields",
            get(search::list_fields).post(search::register_field),
        )
        .route("/api/reload-options", post(options::reload_options))
}
