//! Health, metrics and routing behavior

use crate::support::{assert_status, error_message, TestApp};
use axum::http::{Method, StatusCode};

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, body) = app.request_json(Method::GET, "/health", None).await?;

    assert_status(status, StatusCode::OK, "health");
    assert_eq!(body["status"], "OK");
    let timestamp = body["timestamp"].as_str().unwrap_or_default();
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
    Ok(())
}

#[tokio::test]
async fn unknown_routes_are_json_404s() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, body) = app
        .request_json(Method::GET, "/api/unknown", None)
        .await?;

    assert_status(status, StatusCode::NOT_FOUND, "unknown route");
    assert_eq!(error_message(&body)?, "Endpoint not found");
    Ok(())
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (_, headers, _) = app.request(Method::GET, "/health", None).await?;

    let request_id = headers
        .get("x-request-id")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(uuid::Uuid::parse_str(request_id).is_ok());
    assert_eq!(headers["x-content-type-options"], "nosniff");
    Ok(())
}

#[tokio::test]
async fn metrics_are_exposed_in_text_format() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.request(Method::GET, "/api/metadata", None).await?;

    let (status, _, body) = app.request(Method::GET, "/metrics", None).await?;

    assert_status(status, StatusCode::OK, "metrics");
    let text = String::from_utf8(body.to_vec())?;
    assert!(text.contains("metadata_http_requests_total"));
    assert!(text.contains("metadata_record_operations_total"));
    Ok(())
}
