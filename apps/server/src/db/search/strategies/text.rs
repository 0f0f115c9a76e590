use super::{require_text, MatchStrategy};
use crate::db::search::error::SearchError;
use crate::db::search::escape::literal_substring_pattern;
use crate::db::search::fields::{MatchKind, SearchFieldConfig};
use crate::db::search::filter::{Condition, FilterFragment, TextPattern};

/// Case-insensitive literal substring match on a string attribute.
#[derive(Debug, Default)]
pub struct TextStrategy;

impl MatchStrategy for TextStrategy {
    fn kind(&self) -> MatchKind {
        MatchKind::Text
    }

    fn build_query(
        &self,
        field: &SearchFieldConfig,
        raw: &str,
    ) -> Result<FilterFragment, SearchError> {
        require_text(field, raw)?;
        let pattern = literal_substring_pattern(raw);
        Ok(FilterFragment::new(
            &field.path,
            Condition::Matches(TextPattern::case_insensitive(pattern)),
        ))
    }
}
