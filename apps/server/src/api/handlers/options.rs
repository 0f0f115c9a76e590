//! Option list handlers

use axum::{extract::State, response::IntoResponse, Json};
use serde_json::json;

use crate::state::AppState;

/// Re-read option lists from disk (`POST /api/reload-options`).
pub async fn reload_options(State(state): State<AppState>) -> impl IntoResponse {
    let lists = state.options.reload();
    Json(json!({
        "message": "Options reloaded",
        "options": lists.as_ref(),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
