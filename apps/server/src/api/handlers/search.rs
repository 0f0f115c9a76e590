//! Search handlers
//!
//! - `GET  /api/search?<field>=<value>&_limit=&_skip=&_sort=`
//! - `GET  /api/search/fields`
//! - `POST /api/search/fields`

use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    api::extractors::JsonBody,
    db::search::SearchFieldSpec,
    state::AppState,
    Result,
};

/// Run a search.
///
/// The envelope's `success` decides the status: 200 when set, 400 otherwise,
/// including storage faults (their body only says `Internal search error`).
pub async fn search(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let items = parse_query_items(query.as_deref());
    let response = state.search_service.search(&items).await;

    let status = if response.is_success() {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    (status, Json(response)).into_response()
}

pub async fn list_fields(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.search_service.fields())
}

pub async fn register_field(
    State(state): State<AppState>,
    JsonBody(spec): JsonBody<SearchFieldSpec>,
) -> Result<Response> {
    let name = spec.name.trim().to_string();
    let summary = state.search_service.register_field(spec)?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ name: summary })),
    )
        .into_response())
}

/// Query string items in order, percent-decoded (`+` is a space).
fn parse_query_items(raw_query: Option<&str>) -> Vec<(String, String)> {
    raw_query
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .into_owned()
                .collect()
        })
        .unwrap_or_default()
}
