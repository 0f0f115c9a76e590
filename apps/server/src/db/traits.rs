//! Storage trait for metadata records

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};

use crate::db::search::{CompoundFilter, SearchOptions};
use crate::models::{MetadataRecord, UpdateOutcome};
use crate::Result;

/// Persistent collection of metadata records.
///
/// Any backend (PostgreSQL, in-memory, ...) that can evaluate a
/// [`CompoundFilter`] can serve the search engine and the record API.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Records matching `filter`, ordered by `options.sort` (then by
    /// insertion order), after skipping `options.skip` and taking at most
    /// `options.limit`.
    async fn find(
        &self,
        filter: &CompoundFilter,
        options: &SearchOptions,
    ) -> Result<Vec<MetadataRecord>>;

    /// Number of records matching `filter`, ignoring pagination.
    async fn count(&self, filter: &CompoundFilter) -> Result<u64>;

    /// One page of matches together with the total match count.
    ///
    /// The default runs [`find`](Self::find) and [`count`](Self::count)
    /// concurrently, so a write landing between them can make the two
    /// disagree. Backends that can read both from one snapshot override it.
    async fn find_page(
        &self,
        filter: &CompoundFilter,
        options: &SearchOptions,
    ) -> Result<(Vec<MetadataRecord>, u64)> {
        tokio::try_join!(self.find(filter, options), self.count(filter))
    }

    /// Every record in insertion order.
    async fn list(&self) -> Result<Vec<MetadataRecord>>;

    async fn get(&self, id: &str) -> Result<Option<MetadataRecord>>;

    /// Insert a new record.
    ///
    /// # Errors
    /// * `RecordExists` - a record with the same id is already stored
    async fn insert(&self, record: MetadataRecord) -> Result<MetadataRecord>;

    /// Replace a record's metadata.
    ///
    /// Returns `Unchanged` without touching `updated_at` when the metadata is
    /// identical to the stored one.
    async fn update(
        &self,
        id: &str,
        metadata: Map<String, JsonValue>,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome>;

    /// Delete a record; `false` when it did not exist.
    async fn delete(&self, id: &str) -> Result<bool>;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}
