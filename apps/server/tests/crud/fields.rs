//! Form field definitions and option reloading

use crate::support::{assert_status, payload, to_json_body, TestApp, TEST_GENRES};
use axum::http::{Method, StatusCode};
use serde_json::{json, Value};

static MISSING: Value = Value::Null;

fn field<'a>(defs: &'a Value, name: &str) -> &'a Value {
    defs["predefinedFields"]
        .as_array()
        .and_then(|fields| fields.iter().find(|f| f["name"] == name))
        .unwrap_or(&MISSING)
}

#[tokio::test]
async fn field_definitions_use_loaded_options() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, defs) = app
        .request_json(Method::GET, "/api/metadata/fields", None)
        .await?;

    assert_status(status, StatusCode::OK, "field definitions");
    assert_eq!(field(&defs, "genre")["options"], json!(TEST_GENRES));
    // No dialect file in the test directory: built-in list
    assert_eq!(
        field(&defs, "dialect")["options"],
        json!(["urmi", "standard", "other"])
    );
    assert_eq!(field(&defs, "title")["maxLength"], 500);
    assert_eq!(field(&defs, "authors")["type"], "array");
    assert_eq!(field(&defs, "pub_date")["min"], 1000);
    Ok(())
}

#[tokio::test]
async fn reload_options_applies_to_definitions_and_validation() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let body = to_json_body(&payload(json!({ "dialect": "tiyari" })))?;

    let (status, _) = app
        .request_json(Method::POST, "/api/metadata", Some(body.clone()))
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "dialect before reload");

    app.write_options("dialect", &["urmi", "tiyari"])?;
    let (status, reloaded) = app
        .request_json(Method::POST, "/api/reload-options", None)
        .await?;
    assert_status(status, StatusCode::OK, "reload");
    assert_eq!(reloaded["options"]["dialect"], json!(["urmi", "tiyari"]));

    let (_, defs) = app
        .request_json(Method::GET, "/api/metadata/fields", None)
        .await?;
    assert_eq!(field(&defs, "dialect")["options"], json!(["urmi", "tiyari"]));

    let (status, _) = app
        .request_json(Method::POST, "/api/metadata", Some(body))
        .await?;
    assert_status(status, StatusCode::CREATED, "dialect after reload");
    Ok(())
}
