//! Metrics and health routes

use crate::api::handlers::{health, metrics};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn operational_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/metrics", get(metrics::metrics_handler))
}
