//! Error types for the metadata server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::db::search::SearchError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Record not found")]
    RecordNotFound(String),

    #[error("Record with this ID already exists")]
    RecordExists(String),

    #[error("Invalid ID format")]
    InvalidId(String),

    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::RecordNotFound(_) => StatusCode::NOT_FOUND,
            Error::RecordExists(_) => StatusCode::CONFLICT,
            Error::InvalidId(_) | Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::Search(SearchError::FieldAlreadyRegistered(_)) => StatusCode::CONFLICT,
            Error::Search(SearchError::StorageFault(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Search(_) => StatusCode::BAD_REQUEST,
            Error::Database(_)
            | Error::Storage(_)
            | Error::Config(_)
            | Error::Internal(_)
            | Error::Other(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status.is_server_error() {
            tracing::error!("Internal error: {}", self);
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
