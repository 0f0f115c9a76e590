//! CREATE tests (POST /api/metadata)

use crate::support::{
    assert_status, constants, error_message, minimal_metadata, payload, payload_with_id,
    to_json_body, TestApp,
};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn create_assigns_server_id() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, created) = app
        .request_json(
            Method::POST,
            "/api/metadata",
            Some(to_json_body(&payload(minimal_metadata()))?),
        )
        .await?;

    assert_status(status, StatusCode::CREATED, "create");
    let id = created["id"].as_str().expect("created record must have id");
    assert!(uuid::Uuid::parse_str(id).is_ok(), "id should be a UUID: {id}");
    assert_eq!(created["metadata"]["title"], "The Epic of Gilgamesh");
    assert!(created["createdAt"].is_string());
    assert_eq!(created["createdAt"], created["updatedAt"]);
    Ok(())
}

#[tokio::test]
async fn create_keeps_client_id_and_rejects_duplicates() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let body = to_json_body(&payload_with_id(constants::RECORD_ID, minimal_metadata()))?;

    let (status, created) = app
        .request_json(Method::POST, "/api/metadata", Some(body.clone()))
        .await?;
    assert_status(status, StatusCode::CREATED, "first create");
    assert_eq!(created["id"], constants::RECORD_ID);

    let (status, err) = app
        .request_json(Method::POST, "/api/metadata", Some(body))
        .await?;
    assert_status(status, StatusCode::CONFLICT, "duplicate create");
    assert_eq!(error_message(&err)?, "Record with this ID already exists");
    Ok(())
}

#[tokio::test]
async fn create_keeps_custom_fields_verbatim() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let metadata = json!({
        "title": "Kalila and Dimna",
        "shelf": { "room": 3, "row": "B" },
        "tags": ["fables", "translation"]
    });

    let (status, created) = app
        .request_json(
            Method::POST,
            "/api/metadata",
            Some(to_json_body(&payload(metadata.clone()))?),
        )
        .await?;

    assert_status(status, StatusCode::CREATED, "create");
    assert_eq!(created["metadata"], metadata);
    Ok(())
}

#[tokio::test]
async fn create_rejects_invalid_payloads() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let cases = [
        (json!({ "metadata": {} }), "\"metadata\" must have at least 1 key"),
        (json!({ "id": "abc", "metadata": { "title": "x" } }), "\"id\" must be a valid GUID"),
        (json!({}), "\"metadata\" is required"),
        (
            json!({ "metadata": { "genre": "Romance" } }),
            "\"metadata.genre\" must be one of [Literary, Poetry, academic, literature]",
        ),
        (
            json!({ "metadata": { "language": "Latin" } }),
            "\"metadata.language\" must be one of [Assyrian, English, Arabic, Other]",
        ),
        (
            json!({ "metadata": { "num_pages": -3 } }),
            "\"metadata.num_pages\" must be a positive number",
        ),
        (
            json!({ "metadata": { "authors": [] } }),
            "\"metadata.authors\" must contain at least 1 items",
        ),
    ];

    for (body, expected) in cases {
        let (status, err) = app
            .request_json(Method::POST, "/api/metadata", Some(to_json_body(&body)?))
            .await?;
        assert_status(status, StatusCode::BAD_REQUEST, &body.to_string());
        assert_eq!(error_message(&err)?, expected);
    }

    let (_, all) = app.request_json(Method::GET, "/api/metadata", None).await?;
    assert_eq!(all.as_array().map(Vec::len), Some(0));
    Ok(())
}

#[tokio::test]
async fn create_rejects_malformed_json() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, err) = app
        .request_json(
            Method::POST,
            "/api/metadata",
            Some(axum::body::Bytes::from_static(b"{ \"metadata\": ")),
        )
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "malformed body");
    assert!(error_message(&err)?.starts_with("Invalid JSON in request body"));
    Ok(())
}
