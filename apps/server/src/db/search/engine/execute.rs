use super::SearchEngine;
use crate::db::search::error::SearchError;
use crate::db::search::filter::CompoundFilter;
use crate::db::search::params::SearchOptions;
use crate::models::MetadataRecord;

impl SearchEngine {
    /// Fetch one page and the total count for the same filter.
    ///
    /// Any store failure, or expiry of the configured timeout, becomes a
    /// `StorageFault`; nothing partial is returned.
    pub(super) async fn execute(
        &self,
        filter: &CompoundFilter,
        options: &SearchOptions,
    ) -> Result<(Vec<MetadataRecord>, u64), SearchError> {
        let started = std::time::Instant::now();
        let query = self.store.find_page(filter, options);

        let outcome = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, query).await {
                Ok(result) => result,
                Err(_) => {
                    return Err(SearchError::StorageFault(format!(
                        "search timed out after {} ms",
                        limit.as_millis()
                    )))
                }
            },
            None => query.await,
        };

        crate::metrics::record_store_operation(
            self.store.backend_name(),
            "search",
            started.elapsed().as_secs_f64(),
        );

        outcome.map_err(|e| SearchError::StorageFault(e.to_string()))
    }
}
