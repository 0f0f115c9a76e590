use super::SearchEngine;
use crate::db::search::error::SearchError;
use crate::db::search::filter::CompoundFilter;
use crate::db::search::params::SearchRequest;

impl SearchEngine {
    /// Check every requested field and value.
    ///
    /// All problems are collected; nothing short-circuits.
    pub fn validate(&self, request: &SearchRequest) -> Result<(), Vec<SearchError>> {
        let errors: Vec<SearchError> = request
            .iter()
            .filter_map(|(name, raw)| {
                self.dispatcher
                    .resolve(&self.registry, name)
                    .and_then(|(config, strategy)| strategy.validate_value(&config, raw))
                    .err()
            })
            .collect();

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Build the compound filter for an already validated request.
    ///
    /// Values that passed their rule can still fail to parse (a Number field
    /// with a loose rule); those failures are collected as well.
    pub fn build_filter(&self, request: &SearchRequest) -> Result<CompoundFilter, Vec<SearchError>> {
        let mut fragments = Vec::with_capacity(request.len());
        let mut errors = Vec::new();

        for (name, raw) in request.iter() {
            match self
                .dispatcher
                .resolve(&self.registry, name)
                .and_then(|(config, strategy)| strategy.build_query(&config, raw))
            {
                Ok(fragment) => fragments.push(fragment),
                Err(e) => errors.push(e),
            }
        }

        if errors.is_empty() {
            Ok(CompoundFilter::from_fragments(fragments))
        } else {
            Err(errors)
        }
    }
}
