pub mod builders;
pub mod fixtures;

use anyhow::Context as _;
use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Method, Request, StatusCode},
    Router,
};
use metadata_editor::{api::create_router, db::RecordStore, AppState, Config};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt as _;

pub use assertions::*;
pub use builders::*;
pub use fixtures::*;

/// Genres written to the test options directory.
pub const TEST_GENRES: [&str; 4] = ["Literary", "Poetry", "academic", "literature"];

/// Default configuration pointed at a fresh options directory.
fn test_config() -> anyhow::Result<(TempDir, Config)> {
    let options_dir = tempfile::tempdir().context("create options dir")?;
    std::fs::write(
        options_dir.path().join("genre-options.json"),
        serde_json::to_vec(&TEST_GENRES)?,
    )
    .context("write genre options")?;

    let mut config = Config::defaults();
    config.options.directory = options_dir.path().to_path_buf();
    Ok((options_dir, config))
}

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    options_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> anyhow::Result<Self> {
        Self::new_with_config(|_| {}).await
    }

    pub async fn new_with_config(configure: impl FnOnce(&mut Config)) -> anyhow::Result<Self> {
        let (options_dir, mut config) = test_config()?;
        configure(&mut config);

        let state = AppState::new(config)
            .await
            .context("initialize AppState")?;
        Ok(Self::from_state(state, options_dir))
    }

    /// App over a caller-supplied record store.
    pub fn new_with_store(store: Arc<dyn RecordStore>) -> anyhow::Result<Self> {
        let (options_dir, config) = test_config()?;
        let state = AppState::with_store(config, store).context("initialize AppState")?;
        Ok(Self::from_state(state, options_dir))
    }

    fn from_state(state: AppState, options_dir: TempDir) -> Self {
        Self {
            router: create_router(state.clone()),
            state,
            options_dir,
        }
    }

    /// Overwrite one option list file (`genre`, `dialect` or `source`).
    pub fn write_options(&self, kind: &str, values: &[&str]) -> anyhow::Result<()> {
        std::fs::write(
            self.options_dir.path().join(format!("{kind}-options.json")),
            serde_json::to_vec(values)?,
        )
        .with_context(|| format!("write {kind} options"))
    }

    pub async fn request(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, HeaderMap, Bytes)> {
        let request = Request::builder()
            .method(method)
            .uri(path_and_query)
            .header("host", "example.org")
            .header("accept", "application/json")
            .header("content-type", "application/json")
            .body(match body {
                Some(bytes) => Body::from(bytes),
                None => Body::empty(),
            })
            .context("build request")?;

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .context("dispatch request")?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .context("read response body")?;

        Ok((status, headers, body))
    }

    /// Request expecting a JSON body back.
    pub async fn request_json(
        &self,
        method: Method,
        path_and_query: &str,
        body: Option<Bytes>,
    ) -> anyhow::Result<(StatusCode, serde_json::Value)> {
        let (status, _headers, bytes) = self.request(method, path_and_query, body).await?;
        let value = serde_json::from_slice(&bytes)
            .with_context(|| format!("parse JSON response from {path_and_query}"))?;
        Ok((status, value))
    }
}
