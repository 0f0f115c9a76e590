//! Record handlers
//!
//! - `GET    /api/metadata`
//! - `GET    /api/metadata/fields`
//! - `GET    /api/metadata/{id}`
//! - `POST   /api/metadata`
//! - `PUT    /api/metadata/{id}`
//! - `DELETE /api/metadata/{id}`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    api::extractors::JsonBody,
    models::{RecordPayload, UpdateOutcome},
    services::predefined_fields,
    state::AppState,
    Result,
};

pub async fn list_records(State(state): State<AppState>) -> Result<Response> {
    let records = state.record_service.list().await?;
    Ok(Json(records).into_response())
}

/// Form field definitions with the current option lists.
pub async fn field_definitions(State(state): State<AppState>) -> impl IntoResponse {
    Json(predefined_fields(&state.options.current()))
}

pub async fn read_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    let record = state.record_service.get(&id).await?;
    Ok(Json(record).into_response())
}

pub async fn create_record(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<RecordPayload>,
) -> Result<Response> {
    let record = state.record_service.create(payload).await?;
    Ok((StatusCode::CREATED, Json(record)).into_response())
}

/// Replace a record's metadata; 304 with no body when nothing changed.
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(payload): JsonBody<RecordPayload>,
) -> Result<Response> {
    match state.record_service.update(&id, payload).await? {
        UpdateOutcome::Updated(record) => Ok(Json(record).into_response()),
        UpdateOutcome::Unchanged => Ok(StatusCode::NOT_MODIFIED.into_response()),
        UpdateOutcome::NotFound => Err(crate::Error::RecordNotFound(id)),
    }
}

pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response> {
    state.record_service.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT.into_response())
}
