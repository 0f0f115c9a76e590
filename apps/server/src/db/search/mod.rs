//! Field-driven record search
//!
//! A [`FieldRegistry`] names the searchable fields; the
//! [`StrategyDispatcher`] picks the [`MatchStrategy`] for each field's
//! [`MatchKind`]; the [`SearchEngine`] validates a request, combines the
//! per-field fragments into a [`CompoundFilter`] and runs it against a
//! record store.

pub mod dispatch;
pub mod engine;
pub mod error;
mod escape;
pub mod fields;
pub mod filter;
pub mod params;
pub mod query_builder;
pub mod registry;
pub mod strategies;

pub use dispatch::StrategyDispatcher;
pub use engine::{
    RejectionKind, SearchEngine, SearchRejection, SearchResponse, SearchResult,
    INTERNAL_SEARCH_ERROR,
};
pub use error::SearchError;
pub use fields::{
    default_fields, IntegerBound, MatchKind, SearchFieldConfig, SearchFieldSpec, ValueRule,
    ValueRuleSpec,
};
pub use filter::{lookup_path, CompiledFilter, CompoundFilter, Condition, FilterFragment, TextPattern};
pub use params::{SearchOptions, SearchParameters, SearchRequest, SortDirection, SortSpec};
pub use registry::{FieldRegistry, FieldSummary};
pub use strategies::MatchStrategy;
