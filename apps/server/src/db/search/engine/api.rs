use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{SearchEngine, SearchRejection, SearchResponse, SearchResult, INTERNAL_SEARCH_ERROR};
use crate::config::SearchConfig;
use crate::db::search::dispatch::StrategyDispatcher;
use crate::db::search::error::SearchError;
use crate::db::search::params::{SearchOptions, SearchRequest, DEFAULT_LIMIT};
use crate::db::search::registry::FieldRegistry;
use crate::db::traits::RecordStore;

impl SearchEngine {
    /// Create a search engine with default limits and no timeout.
    pub fn new(store: Arc<dyn RecordStore>, registry: Arc<FieldRegistry>) -> Self {
        Self {
            store,
            registry,
            dispatcher: StrategyDispatcher::new(),
            default_limit: DEFAULT_LIMIT,
            max_limit: usize::MAX,
            timeout: None,
        }
    }

    pub fn from_config(
        store: Arc<dyn RecordStore>,
        registry: Arc<FieldRegistry>,
        config: &SearchConfig,
    ) -> Self {
        Self::new(store, registry)
            .with_limits(config.default_limit, config.max_limit)
            .with_timeout(config.timeout_ms.map(Duration::from_millis))
    }

    pub fn with_limits(mut self, default_limit: usize, max_limit: usize) -> Self {
        self.default_limit = default_limit;
        self.max_limit = max_limit;
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn registry(&self) -> &Arc<FieldRegistry> {
        &self.registry
    }

    pub fn default_limit(&self) -> usize {
        self.default_limit
    }

    pub fn max_limit(&self) -> usize {
        self.max_limit
    }

    /// Search for records.
    ///
    /// Never fails: input problems and storage faults are reported through
    /// a rejected envelope so a bad search cannot affect other requests.
    pub async fn search(&self, request: &SearchRequest, options: &SearchOptions) -> SearchResponse {
        let started = Instant::now();
        let response = self.search_inner(request, options).await;

        let returned = response.result().map(|r| r.returned_count);
        crate::metrics::record_search(
            response.outcome_label(),
            started.elapsed().as_secs_f64(),
            returned,
        );
        response
    }

    async fn search_inner(&self, request: &SearchRequest, options: &SearchOptions) -> SearchResponse {
        if let Err(errors) = self.validate(request) {
            tracing::debug!(errors = errors.len(), "Search rejected during validation");
            return reject(errors);
        }

        let filter = match self.build_filter(request) {
            Ok(filter) => filter,
            Err(errors) => {
                tracing::debug!(errors = errors.len(), "Search rejected while building filter");
                return reject(errors);
            }
        };

        let options = self.effective_options(options);
        tracing::debug!(
            fields = request.len(),
            fragments = filter.len(),
            limit = options.limit,
            skip = options.skip,
            "Executing search"
        );

        let (records, total_count) = match self.execute(&filter, &options).await {
            Ok(found) => found,
            Err(e) => {
                tracing::error!(error = %e, "Search execution failed");
                return SearchResponse::Rejected(SearchRejection::internal(INTERNAL_SEARCH_ERROR));
            }
        };

        let returned_count = records.len();
        let has_more = (options.skip as u64).saturating_add(returned_count as u64) < total_count;

        SearchResponse::Matched(SearchResult {
            success: true,
            validated_params: request.clone(),
            filter,
            records,
            total_count,
            returned_count,
            has_more,
        })
    }

    /// Apply the default for a zero limit and clamp to the maximum.
    fn effective_options(&self, options: &SearchOptions) -> SearchOptions {
        let limit = if options.limit == 0 {
            self.default_limit
        } else {
            options.limit
        };
        SearchOptions {
            limit: limit.min(self.max_limit),
            skip: options.skip,
            sort: options.sort.clone(),
        }
    }
}

fn reject(errors: Vec<SearchError>) -> SearchResponse {
    if errors.iter().all(SearchError::is_input_error) {
        SearchResponse::Rejected(SearchRejection::input(
            errors.iter().map(ToString::to_string).collect(),
        ))
    } else {
        for e in errors.iter().filter(|e| !e.is_input_error()) {
            tracing::error!(error = %e, "Search configuration fault");
        }
        SearchResponse::Rejected(SearchRejection::internal(INTERNAL_SEARCH_ERROR))
    }
}
