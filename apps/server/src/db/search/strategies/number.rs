use serde_json::Value as JsonValue;

use super::{parse_integer, MatchStrategy};
use crate::db::search::error::SearchError;
use crate::db::search::fields::{MatchKind, SearchFieldConfig};
use crate::db::search::filter::{Condition, FilterFragment};

/// Integer equality.
#[derive(Debug, Default)]
pub struct NumberStrategy;

impl MatchStrategy for NumberStrategy {
    fn kind(&self) -> MatchKind {
        MatchKind::Number
    }

    fn build_query(
        &self,
        field: &SearchFieldConfig,
        raw: &str,
    ) -> Result<FilterFragment, SearchError> {
        let value = parse_integer(field, raw)?;
        Ok(FilterFragment::new(
            &field.path,
            Condition::Equals(JsonValue::from(value)),
        ))
    }
}
