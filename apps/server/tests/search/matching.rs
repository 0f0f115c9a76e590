//! Search matching tests (GET /api/search)

use crate::support::{
    assert_status, search_errors, search_ids, search_records, seed_library, TestApp,
};
use axum::http::{Method, StatusCode};
use serde_json::json;

#[tokio::test]
async fn multiple_fields_combine_with_and() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let library = seed_library(&app).await?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?genre=Literary&country=Iraq", None)
        .await?;

    assert_status(status, StatusCode::OK, "AND search");
    assert_eq!(search_ids(&body)?, vec![library.gilgamesh]);
    assert_eq!(
        body["validatedParams"],
        json!({ "country": "Iraq", "genre": "Literary" })
    );
    assert_eq!(
        body["filter"],
        json!({
            "$and": [
                { "metadata.country": { "$regex": "Iraq", "$options": "i" } },
                { "metadata.genre": "Literary" }
            ]
        })
    );
    Ok(())
}

#[tokio::test]
async fn text_fields_match_case_insensitive_substrings() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let library = seed_library(&app).await?;

    let (_, body) = app
        .request_json(Method::GET, "/api/search?title=GILGAMESH", None)
        .await?;

    assert_eq!(
        search_ids(&body)?,
        vec![library.gilgamesh, library.gilgamesh_translation]
    );
    assert_eq!(body["totalCount"], 2);
    Ok(())
}

#[tokio::test]
async fn exact_fields_do_not_match_substrings() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    seed_library(&app).await?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?genre=Liter", None)
        .await?;

    assert_status(status, StatusCode::OK, "exact search");
    assert!(search_records(&body)?.is_empty());
    Ok(())
}

#[tokio::test]
async fn regex_metacharacters_are_literal() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let library = seed_library(&app).await?;

    let (_, body) = app
        .request_json(Method::GET, "/api/search?title=%282nd%20ed.%29", None)
        .await?;
    assert_eq!(search_ids(&body)?, vec![library.grammar]);

    let (status, body) = app
        .request_json(Method::GET, "/api/search?title=.*", None)
        .await?;
    assert_status(status, StatusCode::OK, "wildcard-looking value");
    assert!(search_records(&body)?.is_empty());
    Ok(())
}

#[tokio::test]
async fn array_fields_match_any_element() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let library = seed_library(&app).await?;

    let (_, body) = app
        .request_json(Method::GET, "/api/search?authors=mitchell", None)
        .await?;

    assert_eq!(search_ids(&body)?, vec![library.gilgamesh_translation]);
    Ok(())
}

#[tokio::test]
async fn number_and_range_fields() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let library = seed_library(&app).await?;

    let (_, body) = app
        .request_json(Method::GET, "/api/search?year=1998", None)
        .await?;
    assert_eq!(search_ids(&body)?, vec![library.gilgamesh.clone()]);

    let (_, body) = app
        .request_json(Method::GET, "/api/search?published=1998-2004", None)
        .await?;
    assert_eq!(
        search_ids(&body)?,
        vec![library.gilgamesh, library.gilgamesh_translation]
    );

    let (_, body) = app
        .request_json(Method::GET, "/api/search?published=2021", None)
        .await?;
    assert_eq!(search_ids(&body)?, vec![library.poems]);
    Ok(())
}

#[tokio::test]
async fn inverted_range_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    seed_library(&app).await?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?published=2023-2020", None)
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "inverted range");
    let errors = search_errors(&body)?;
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Invalid value for published"));
    Ok(())
}

#[tokio::test]
async fn blank_text_values_are_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    seed_library(&app).await?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?title=%20%20&authors=+", None)
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "blank text search");
    assert_eq!(
        search_errors(&body)?,
        vec![
            "Invalid value for authors: is not allowed to be blank".to_string(),
            "Invalid value for title: is not allowed to be blank".to_string(),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn every_invalid_parameter_is_reported() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?isbn=123&year=abc&title=x", None)
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "invalid search");
    assert_eq!(
        search_errors(&body)?,
        vec![
            "Unknown search field: isbn".to_string(),
            "Invalid value for year: must be an integer".to_string(),
        ]
    );
    assert!(body.get("records").is_none());
    Ok(())
}

#[tokio::test]
async fn empty_search_matches_everything() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    seed_library(&app).await?;

    let (status, body) = app.request_json(Method::GET, "/api/search", None).await?;

    assert_status(status, StatusCode::OK, "empty search");
    assert_eq!(body["filter"], json!({}));
    assert_eq!(body["totalCount"], 4);
    assert_eq!(body["returnedCount"], 4);
    assert_eq!(body["hasMore"], false);
    Ok(())
}

#[tokio::test]
async fn repeated_searches_are_identical() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    seed_library(&app).await?;
    let path = "/api/search?country=ir&_sort=-year";

    let (_, first) = app.request_json(Method::GET, path, None).await?;
    let (_, second) = app.request_json(Method::GET, path, None).await?;

    assert_eq!(first, second);
    assert_eq!(first["totalCount"], 3);
    Ok(())
}

#[tokio::test]
async fn id_search_accepts_only_the_stored_form() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let library = seed_library(&app).await?;

    let (status, body) = app
        .request_json(Method::GET, &format!("/api/search?id={}", library.grammar), None)
        .await?;
    assert_status(status, StatusCode::OK, "hyphenated id");
    assert_eq!(search_ids(&body)?, vec![library.grammar.clone()]);

    let braced = format!("%7B{}%7D", library.grammar);
    let (status, body) = app
        .request_json(Method::GET, &format!("/api/search?id={braced}"), None)
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "braced id");
    assert_eq!(
        search_errors(&body)?,
        vec!["Invalid value for id: must be a valid UUID".to_string()]
    );
    Ok(())
}
