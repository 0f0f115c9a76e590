//! Storage faults during search

use async_trait::async_trait;
use axum::http::{Method, StatusCode};
use chrono::{DateTime, Utc};
use metadata_editor::db::search::{CompoundFilter, SearchOptions};
use metadata_editor::db::RecordStore;
use metadata_editor::models::{MetadataRecord, UpdateOutcome};
use metadata_editor::{Error, Result};
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::support::{assert_status, search_errors, TestApp};

/// Store whose every call fails, as an unreachable database would.
struct UnavailableStore;

fn unavailable<T>() -> Result<T> {
    Err(Error::Storage("connection refused".to_string()))
}

#[async_trait]
impl RecordStore for UnavailableStore {
    async fn find(&self, _: &CompoundFilter, _: &SearchOptions) -> Result<Vec<MetadataRecord>> {
        unavailable()
    }

    async fn count(&self, _: &CompoundFilter) -> Result<u64> {
        unavailable()
    }

    async fn list(&self) -> Result<Vec<MetadataRecord>> {
        unavailable()
    }

    async fn get(&self, _: &str) -> Result<Option<MetadataRecord>> {
        unavailable()
    }

    async fn insert(&self, _: MetadataRecord) -> Result<MetadataRecord> {
        unavailable()
    }

    async fn update(
        &self,
        _: &str,
        _: Map<String, Value>,
        _: DateTime<Utc>,
    ) -> Result<UpdateOutcome> {
        unavailable()
    }

    async fn delete(&self, _: &str) -> Result<bool> {
        unavailable()
    }

    fn backend_name(&self) -> &'static str {
        "unavailable"
    }
}

#[tokio::test]
async fn storage_fault_is_a_generic_failed_envelope() -> anyhow::Result<()> {
    let app = TestApp::new_with_store(Arc::new(UnavailableStore))?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?title=gilgamesh", None)
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "search over failing store");
    assert_eq!(search_errors(&body)?, vec!["Internal search error".to_string()]);
    assert!(!body.to_string().contains("connection refused"));
    Ok(())
}

#[tokio::test]
async fn input_errors_are_reported_before_storage_is_touched() -> anyhow::Result<()> {
    let app = TestApp::new_with_store(Arc::new(UnavailableStore))?;

    let (status, body) = app
        .request_json(Method::GET, "/api/search?shelf=3", None)
        .await?;

    assert_status(status, StatusCode::BAD_REQUEST, "unknown field");
    let errors = search_errors(&body)?;
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("shelf"), "{errors:?}");
    Ok(())
}
