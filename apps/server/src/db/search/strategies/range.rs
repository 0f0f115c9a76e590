use super::{parse_integer, MatchStrategy, NumberStrategy};
use crate::db::search::error::SearchError;
use crate::db::search::fields::{MatchKind, SearchFieldConfig};
use crate::db::search::filter::{Condition, FilterFragment};

/// Inclusive integer range written `low-high`; a single integer means equality.
#[derive(Debug, Default)]
pub struct RangeStrategy;

impl MatchStrategy for RangeStrategy {
    fn kind(&self) -> MatchKind {
        MatchKind::Range
    }

    fn build_query(
        &self,
        field: &SearchFieldConfig,
        raw: &str,
    ) -> Result<FilterFragment, SearchError> {
        let Some((low, high)) = raw.split_once('-') else {
            return NumberStrategy.build_query(field, raw);
        };

        let low = parse_integer(field, low)?;
        let high = parse_integer(field, high)?;
        if low > high {
            return Err(SearchError::invalid_value(
                &field.name,
                format!("range start {low} is greater than range end {high}"),
            ));
        }

        Ok(FilterFragment::new(&field.path, Condition::Between { low, high }))
    }
}
