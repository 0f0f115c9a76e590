//! Match strategies - one per [`MatchKind`]
//!
//! A strategy turns a raw search value into a [`FilterFragment`] against the
//! attribute path of the field it is applied to. Strategies hold no state;
//! the field configuration is supplied on every call.

use super::error::SearchError;
use super::fields::{MatchKind, SearchFieldConfig};
use super::filter::FilterFragment;

mod array;
mod exact;
mod number;
mod range;
mod text;

pub use array::ArrayTextStrategy;
pub use exact::ExactStrategy;
pub use number::NumberStrategy;
pub use range::RangeStrategy;
pub use text::TextStrategy;

pub trait MatchStrategy: Send + Sync + std::fmt::Debug {
    fn kind(&self) -> MatchKind;

    /// Check `raw` against the field's value rule.
    ///
    /// Runs before [`MatchStrategy::build_query`]; nothing is parsed or
    /// escaped here.
    fn validate_value(&self, field: &SearchFieldConfig, raw: &str) -> Result<(), SearchError> {
        field
            .value_rule
            .check(raw)
            .map_err(|reason| SearchError::invalid_value(&field.name, reason))
    }

    /// Build the filter fragment for an already validated value.
    fn build_query(&self, field: &SearchFieldConfig, raw: &str)
        -> Result<FilterFragment, SearchError>;
}

/// Parse a base-10 integer, ignoring surrounding whitespace.
pub(super) fn parse_integer(field: &SearchFieldConfig, raw: &str) -> Result<i64, SearchError> {
    let trimmed = raw.trim();
    trimmed.parse::<i64>().map_err(|_| {
        SearchError::invalid_value(&field.name, format!("'{trimmed}' is not a valid integer"))
    })
}

/// Reject a value that is nothing but whitespace; it would match every string.
pub(super) fn require_text(field: &SearchFieldConfig, raw: &str) -> Result<(), SearchError> {
    if raw.trim().is_empty() {
        return Err(SearchError::invalid_value(
            &field.name,
            "is not allowed to be blank",
        ));
    }
    Ok(())
}
