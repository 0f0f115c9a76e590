//! Searchable field registry tests (/api/search/fields)

use crate::support::{
    assert_status, create_record, error_message, search_ids, to_json_body, TestApp,
};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

fn edition_field() -> Value {
    json!({
        "name": "edition",
        "path": "metadata.edition",
        "type": "text",
        "label": "Edition",
        "description": "Search in edition field",
        "rule": { "kind": "length", "max": 500 }
    })
}

#[tokio::test]
async fn default_fields_are_listed() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, fields) = app
        .request_json(Method::GET, "/api/search/fields", None)
        .await?;

    assert_status(status, StatusCode::OK, "list fields");
    assert_eq!(
        fields["title"],
        json!({ "label": "Title", "description": "Search in record title", "type": "text" })
    );
    assert_eq!(fields["authors"]["type"], "array");
    assert_eq!(fields["published"]["type"], "range");
    assert!(fields.get("edition").is_none());
    Ok(())
}

#[tokio::test]
async fn registered_field_becomes_searchable() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let second = create_record(&app, json!({ "title": "Grammar", "edition": "2nd" })).await?;
    create_record(&app, json!({ "title": "Grammar", "edition": "1st" })).await?;

    let (status, _) = app
        .request_json(Method::GET, "/api/search?edition=2nd", None)
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "search before registration");

    let (status, created) = app
        .request_json(
            Method::POST,
            "/api/search/fields",
            Some(to_json_body(&edition_field())?),
        )
        .await?;
    assert_status(status, StatusCode::CREATED, "register");
    assert_eq!(created["edition"]["type"], "text");

    let (status, body) = app
        .request_json(Method::GET, "/api/search?edition=2ND", None)
        .await?;
    assert_status(status, StatusCode::OK, "search after registration");
    assert_eq!(search_ids(&body)?, vec![second["id"].as_str().unwrap_or_default()]);
    Ok(())
}

#[tokio::test]
async fn duplicate_registration_conflicts() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let mut title = edition_field();
    title["name"] = json!("title");
    let (status, _) = app
        .request_json(Method::POST, "/api/search/fields", Some(to_json_body(&title)?))
        .await?;
    assert_status(status, StatusCode::CONFLICT, "re-register built-in");

    let (_, fields) = app
        .request_json(Method::GET, "/api/search/fields", None)
        .await?;
    assert_eq!(fields["title"]["label"], "Title");
    Ok(())
}

#[tokio::test]
async fn unsupported_match_kind_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let mut fuzzy = edition_field();
    fuzzy["type"] = json!("fuzzy");
    let (status, err) = app
        .request_json(Method::POST, "/api/search/fields", Some(to_json_body(&fuzzy)?))
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "unsupported kind");
    assert_eq!(error_message(&err)?, "Unsupported match kind: fuzzy");
    Ok(())
}
