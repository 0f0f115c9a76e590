//! DELETE tests (DELETE /api/metadata/:id)

use crate::support::{assert_status, constants, create_record_id, error_message, TestApp};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn delete_removes_record() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let id = create_record_id(&app, json!({ "title": "Ephemeral" })).await?;
    let path = format!("/api/metadata/{id}");

    let (status, _headers, body) = app.request(Method::DELETE, &path, None).await?;
    assert_status(status, StatusCode::NO_CONTENT, "delete");
    assert!(body.is_empty());

    let (status, _) = app.request_json(Method::GET, &path, None).await?;
    assert_status(status, StatusCode::NOT_FOUND, "read after delete");

    let (status, err) = app.request_json(Method::DELETE, &path, None).await?;
    assert_status(status, StatusCode::NOT_FOUND, "second delete");
    assert_eq!(error_message(&err)?, "Record not found");
    Ok(())
}

#[tokio::test]
async fn delete_rejects_malformed_and_missing_ids() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, err) = app
        .request_json(Method::DELETE, "/api/metadata/xyz", None)
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "malformed id");
    assert_eq!(error_message(&err)?, "Invalid ID format");

    let (status, _) = app
        .request_json(
            Method::DELETE,
            &format!("/api/metadata/{}", constants::MISSING_ID),
            None,
        )
        .await?;
    assert_status(status, StatusCode::NOT_FOUND, "missing id");
    Ok(())
}
