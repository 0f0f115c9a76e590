use serde_json::Value as JsonValue;

use super::MatchStrategy;
use crate::db::search::error::SearchError;
use crate::db::search::fields::{MatchKind, SearchFieldConfig};
use crate::db::search::filter::{Condition, FilterFragment};

/// Attribute equals the raw value verbatim.
#[derive(Debug, Default)]
pub struct ExactStrategy;

impl MatchStrategy for ExactStrategy {
    fn kind(&self) -> MatchKind {
        MatchKind::Exact
    }

    fn build_query(
        &self,
        field: &SearchFieldConfig,
        raw: &str,
    ) -> Result<FilterFragment, SearchError> {
        Ok(FilterFragment::new(
            &field.path,
            Condition::Equals(JsonValue::String(raw.to_string())),
        ))
    }
}
