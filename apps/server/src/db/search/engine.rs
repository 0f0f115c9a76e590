//! Search engine - validation, filter building and execution
//!
//! The SearchEngine is responsible for:
//! - Validating every requested field against the registry and its strategy
//! - Building one filter fragment per field and combining them with AND
//! - Executing the compound filter against the record store with pagination
//! - Shaping the result envelope

use std::sync::Arc;
use std::time::Duration;

use super::dispatch::StrategyDispatcher;
use super::registry::FieldRegistry;
use crate::db::traits::RecordStore;

pub use result::{RejectionKind, SearchRejection, SearchResponse, SearchResult};

mod api;
mod build;
mod execute;
mod result;

/// Generic message returned for storage and internal faults.
pub const INTERNAL_SEARCH_ERROR: &str = "Internal search error";

/// Search engine executing field searches against a record store.
pub struct SearchEngine {
    store: Arc<dyn RecordStore>,
    registry: Arc<FieldRegistry>,
    dispatcher: StrategyDispatcher,
    default_limit: usize,
    max_limit: usize,
    timeout: Option<Duration>,
}
