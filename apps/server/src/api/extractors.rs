//! Custom Axum extractors

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::json;

/// JSON request body whose failures answer in the API's `{ "error": ... }`
/// shape instead of axum's plain-text rejections.
///
/// Accepts `application/json`, any `+json` media type, or a missing
/// Content-Type.
pub struct JsonBody<T>(pub T);

/// Error type for [`JsonBody`] extraction failures.
#[derive(Debug)]
pub struct JsonBodyRejection {
    status: StatusCode,
    message: String,
}

impl IntoResponse for JsonBodyRejection {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

fn accepts_json(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get("content-type").and_then(|v| v.to_str().ok()) else {
        return true;
    };
    let media_type = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_lowercase();
    media_type.is_empty() || media_type == "application/json" || media_type.ends_with("+json")
}

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = JsonBodyRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !accepts_json(req.headers()) {
            return Err(JsonBodyRejection {
                status: StatusCode::UNSUPPORTED_MEDIA_TYPE,
                message: "Expected Content-Type: application/json".to_string(),
            });
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| JsonBodyRejection {
                status: e.status(),
                message: format!("Failed to read request body: {}", e.body_text()),
            })?;

        let value = serde_json::from_slice(&bytes).map_err(|e| JsonBodyRejection {
            status: StatusCode::BAD_REQUEST,
            message: format!("Invalid JSON in request body: {}", e),
        })?;

        Ok(JsonBody(value))
    }
}
