//! READ tests (GET /api/metadata, GET /api/metadata/:id)

use crate::support::{assert_status, constants, create_record, error_message, TestApp};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn read_returns_created_record() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let created = create_record(&app, json!({ "title": "Targum Onqelos" })).await?;
    let id = created["id"].as_str().unwrap_or_default();

    let (status, read) = app
        .request_json(Method::GET, &format!("/api/metadata/{id}"), None)
        .await?;

    assert_status(status, StatusCode::OK, "read");
    assert_eq!(read, created);
    Ok(())
}

#[tokio::test]
async fn read_distinguishes_bad_and_missing_ids() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, err) = app
        .request_json(Method::GET, "/api/metadata/not-a-uuid", None)
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "malformed id");
    assert_eq!(error_message(&err)?, "Invalid ID format");

    let (status, err) = app
        .request_json(
            Method::GET,
            &format!("/api/metadata/{}", constants::MISSING_ID),
            None,
        )
        .await?;
    assert_status(status, StatusCode::NOT_FOUND, "missing id");
    assert_eq!(error_message(&err)?, "Record not found");
    Ok(())
}

#[tokio::test]
async fn list_returns_every_record_in_creation_order() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let first = create_record(&app, json!({ "title": "First" })).await?;
    let second = create_record(&app, json!({ "title": "Second" })).await?;

    let (status, all) = app.request_json(Method::GET, "/api/metadata", None).await?;

    assert_status(status, StatusCode::OK, "list");
    assert_eq!(all, json!([first, second]));
    Ok(())
}
