//! Record API Routes
//!
//! `/api/metadata/fields` is a static segment and takes priority over
//! `/api/metadata/:id`.

use crate::api::handlers::records;
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn record_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/metadata",
            get(records::list_records).post(records::create_record),
        )
        .route("/api/metadata/fields", get(records::field_definitions))
        .route(
            "/api/metadata/:id",
            get(records::read_record)
                .put(records::update_record)
                .delete(records::delete_record),
        )
}
