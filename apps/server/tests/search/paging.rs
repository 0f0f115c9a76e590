//! Paging and sorting tests (_limit, _skip, _sort)

use crate::support::{assert_status, create_record, search_errors, search_ids, TestApp};
use axum::http::{Method, StatusCode};
use serde_json::json;

async fn seed_numbered(app: &TestApp, count: usize) -> anyhow::Result<Vec<String>> {
    let mut ids = Vec::with_capacity(count);
    for n in 0..count {
        let record = create_record(
            app,
            json!({ "title": format!("Issue {n}"), "genre": "Poetry", "pub_date": 2000 + n }),
        )
        .await?;
        ids.push(record["id"].as_str().unwrap_or_default().to_string());
    }
    Ok(ids)
}

#[tokio::test]
async fn last_page_is_partial_and_final() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let ids = seed_numbered(&app, 10).await?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?genre=Poetry&_limit=5&_skip=8", None)
        .await?;

    assert_status(status, StatusCode::OK, "last page");
    assert_eq!(body["totalCount"], 10);
    assert_eq!(body["returnedCount"], 2);
    assert_eq!(body["hasMore"], false);
    assert_eq!(search_ids(&body)?, ids[8..].to_vec());
    Ok(())
}

#[tokio::test]
async fn earlier_pages_report_more() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let ids = seed_numbered(&app, 10).await?;

    let (_, body) = app
        .request_json(Method::GET, "/api/search?_limit=3&_skip=3", None)
        .await?;

    assert_eq!(body["returnedCount"], 3);
    assert_eq!(body["hasMore"], true);
    assert_eq!(search_ids(&body)?, ids[3..6].to_vec());
    Ok(())
}

#[tokio::test]
async fn skip_past_the_end_is_empty() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    seed_numbered(&app, 4).await?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?_skip=10", None)
        .await?;

    assert_status(status, StatusCode::OK, "skip past end");
    assert_eq!(body["totalCount"], 4);
    assert_eq!(body["returnedCount"], 0);
    assert_eq!(body["hasMore"], false);
    Ok(())
}

#[tokio::test]
async fn limit_is_clamped_to_configured_maximum() -> anyhow::Result<()> {
    let app = TestApp::new_with_config(|config| {
        config.search.default_limit = 2;
        config.search.max_limit = 3;
    })
    .await?;
    seed_numbered(&app, 5).await?;

    let (_, body) = app.request_json(Method::GET, "/api/search", None).await?;
    assert_eq!(body["returnedCount"], 2);

    let (_, body) = app
        .request_json(Method::GET, "/api/search?_limit=50", None)
        .await?;
    assert_eq!(body["returnedCount"], 3);
    assert_eq!(body["hasMore"], true);
    Ok(())
}

#[tokio::test]
async fn sort_by_field_names() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let ids = seed_numbered(&app, 4).await?;

    let (_, body) = app
        .request_json(Method::GET, "/api/search?_sort=-year", None)
        .await?;

    let mut expected = ids.clone();
    expected.reverse();
    assert_eq!(search_ids(&body)?, expected);
    Ok(())
}

#[tokio::test]
async fn malformed_control_parameters_are_rejected() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?_limit=ten", None)
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "bad _limit");
    assert_eq!(search_errors(&body)?, vec!["Invalid _limit value: ten".to_string()]);

    let (status, body) = app
        .request_json(Method::GET, "/api/search?_sort=shelf", None)
        .await?;
    assert_status(status, StatusCode::BAD_REQUEST, "unknown sort field");
    assert_eq!(search_errors(&body)?, vec!["Unknown sort field: shelf".to_string()]);
    Ok(())
}
