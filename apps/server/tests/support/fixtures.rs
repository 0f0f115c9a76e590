use anyhow::Context as _;
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

use super::{payload, to_json_body, TestApp};

/// Create a record through the API and return the stored record.
pub async fn create_record(app: &TestApp, metadata: Value) -> anyhow::Result<Value> {
    let (status, body) = app
        .request_json(
            Method::POST,
            "/api/metadata",
            Some(to_json_body(&payload(metadata))?),
        )
        .await?;
    anyhow::ensure!(status == StatusCode::CREATED, "create failed: {status} {body}");
    Ok(body)
}

/// Create a record and return its id.
pub async fn create_record_id(app: &TestApp, metadata: Value) -> anyhow::Result<String> {
    let record = create_record(app, metadata).await?;
    record["id"]
        .as_str()
        .map(str::to_string)
        .context("created record has id")
}

/// Ids of the small library created by [`seed_library`].
pub struct Library {
    pub gilgamesh: String,
    pub gilgamesh_translation: String,
    pub grammar: String,
    pub poems: String,
}

/// Four records covering the default search fields.
pub async fn seed_library(app: &TestApp) -> anyhow::Result<Library> {
    Ok(Library {
        gilgamesh: create_record_id(
            app,
            json!({
                "title": "The Epic of Gilgamesh",
                "genre": "Literary",
                "country": "Iraq",
                "language": "Assyrian",
                "authors": ["Sin-leqi-unninni"],
                "pub_date": 1998
            }),
        )
        .await?,
        gilgamesh_translation: create_record_id(
            app,
            json!({
                "title": "Gilgamesh: A New Translation",
                "genre": "Literary",
                "country": "Syria",
                "authors": ["Andrew George", "Stephen Mitchell"],
                "pub_date": 2004
            }),
        )
        .await?,
        grammar: create_record_id(
            app,
            json!({
                "title": "Urmi Grammar (2nd ed.)",
                "genre": "academic",
                "country": "Iran",
                "dialect": "urmi",
                "authors": ["Arthur Maclean"],
                "pub_date": 1895
            }),
        )
        .await?,
        poems: create_record_id(
            app,
            json!({
                "title": "Modern Poems",
                "genre": "Poetry",
                "country": "Iraq",
                "pub_date": 2021
            }),
        )
        .await?,
    })
}
