//! Search service
//!
//! Turns raw query items into a search request plus paging options, runs the
//! engine, and manages the field registry on behalf of the HTTP layer.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::db::search::{
    FieldRegistry, FieldSummary, SearchEngine, SearchFieldSpec, SearchParameters,
    SearchRejection, SearchResponse,
};
use crate::Result;

pub struct SearchService {
    engine: Arc<SearchEngine>,
}

impl SearchService {
    pub fn new(engine: Arc<SearchEngine>) -> Self {
        Self { engine }
    }

    fn registry(&self) -> &Arc<FieldRegistry> {
        self.engine.registry()
    }

    /// Search with `?field=value&_limit=&_skip=&_sort=` style items.
    ///
    /// Malformed control parameters come back as an input rejection, in the
    /// same envelope as field errors.
    pub async fn search(&self, query_items: &[(String, String)]) -> SearchResponse {
        let prepared = SearchParameters::from_items(query_items).and_then(|params| {
            let options = params.to_options(
                self.registry(),
                self.engine.default_limit(),
                self.engine.max_limit(),
            )?;
            Ok((params, options))
        });

        match prepared {
            Ok((params, options)) => self.engine.search(&params.request, &options).await,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected search control parameters");
                SearchResponse::Rejected(SearchRejection::input(vec![e.to_string()]))
            }
        }
    }

    /// Searchable fields keyed by name.
    pub fn fields(&self) -> BTreeMap<String, FieldSummary> {
        self.registry()
            .list_all()
            .into_iter()
            .map(|f| (f.name.clone(), f))
            .collect()
    }

    /// Register a new searchable field at runtime.
    pub fn register_field(&self, spec: SearchFieldSpec) -> Result<FieldSummary> {
        let config = spec.into_config()?;
        let name = config.name.clone();
        self.registry().register(config)?;
        crate::metrics::SEARCH_FIELDS_REGISTERED.set(self.registry().len() as i64);

        self.registry()
            .list_all()
            .into_iter()
            .find(|f| f.name == name)
            .ok_or_else(|| {
                crate::Error::Internal(format!("field '{name}' missing after registration"))
            })
    }
}
