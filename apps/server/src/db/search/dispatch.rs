//! Strategy dispatch
//!
//! Maps a [`MatchKind`] to its shared strategy instance. One instance exists
//! per kind and is reused by every field with that kind.

use std::str::FromStr;
use std::sync::Arc;

use super::error::SearchError;
use super::fields::{MatchKind, SearchFieldConfig};
use super::registry::FieldRegistry;
use super::strategies::{
    ArrayTextStrategy, ExactStrategy, MatchStrategy, NumberStrategy, RangeStrategy, TextStrategy,
};

static EXACT: ExactStrategy = ExactStrategy;
static TEXT: TextStrategy = TextStrategy;
static ARRAY_TEXT: ArrayTextStrategy = ArrayTextStrategy;
static NUMBER: NumberStrategy = NumberStrategy;
static RANGE: RangeStrategy = RangeStrategy;

/// Resolves fields and match kinds to strategy instances.
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyDispatcher;

impl StrategyDispatcher {
    pub fn new() -> Self {
        Self
    }

    pub fn for_kind(&self, kind: MatchKind) -> &'static dyn MatchStrategy {
        match kind {
            MatchKind::Exact => &EXACT,
            MatchKind::Text => &TEXT,
            MatchKind::ArrayText => &ARRAY_TEXT,
            MatchKind::Number => &NUMBER,
            MatchKind::Range => &RANGE,
        }
    }

    /// Look up a strategy by kind name, as written in configuration.
    pub fn for_kind_name(&self, name: &str) -> Result<&'static dyn MatchStrategy, SearchError> {
        MatchKind::from_str(name).map(|kind| self.for_kind(kind))
    }

    /// Resolve a registered field to its configuration and strategy.
    pub fn resolve(
        &self,
        registry: &FieldRegistry,
        field_name: &str,
    ) -> Result<(Arc<SearchFieldConfig>, &'static dyn MatchStrategy), SearchError> {
        let config = registry
            .lookup(field_name)
            .ok_or_else(|| SearchError::UnknownField(field_name.to_string()))?;
        let strategy = self.for_kind(config.match_kind);
        Ok((config, strategy))
    }
}
