//! In-memory record store
//!
//! Used when no database is configured, when PostgreSQL is unreachable at
//! startup and fallback is enabled, and by the test suite. Records keep
//! their insertion order, which is also the final sort tiebreak.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};
use std::cmp::Ordering;
use tokio::sync::RwLock;

use super::search::{lookup_path, CompoundFilter, SearchOptions, SortDirection, SortSpec};
use super::traits::RecordStore;
use crate::models::{MetadataRecord, UpdateOutcome};
use crate::{Error, Result};

#[derive(Debug, Default)]
pub struct MemoryRecordStore {
    records: RwLock<Vec<MetadataRecord>>,
}

impl MemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `records`, in the given order.
    pub fn with_records(records: Vec<MetadataRecord>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    fn matching(
        records: &[MetadataRecord],
        filter: &CompoundFilter,
    ) -> Result<Vec<(JsonValue, MetadataRecord)>> {
        let compiled = filter
            .compile()
            .map_err(|e| Error::Storage(format!("invalid filter pattern: {e}")))?;
        Ok(records
            .iter()
            .map(|r| (r.to_document(), r))
            .filter(|(doc, _)| compiled.matches(doc))
            .map(|(doc, r)| (doc, r.clone()))
            .collect())
    }
}

#[async_trait]
impl RecordStore for MemoryRecordStore {
    async fn find(
        &self,
        filter: &CompoundFilter,
        options: &SearchOptions,
    ) -> Result<Vec<MetadataRecord>> {
        Ok(self.find_page(filter, options).await?.0)
    }

    async fn count(&self, filter: &CompoundFilter) -> Result<u64> {
        let records = self.records.read().await;
        Ok(Self::matching(&records, filter)?.len() as u64)
    }

    async fn find_page(
        &self,
        filter: &CompoundFilter,
        options: &SearchOptions,
    ) -> Result<(Vec<MetadataRecord>, u64)> {
        let records = self.records.read().await;
        let mut matched = Self::matching(&records, filter)?;
        drop(records);

        let total = matched.len() as u64;
        if !options.sort.is_empty() {
            // Stable sort keeps insertion order for ties.
            matched.sort_by(|(a, _), (b, _)| compare_documents(a, b, &options.sort));
        }

        let page = matched
            .into_iter()
            .skip(options.skip)
            .take(options.limit)
            .map(|(_, record)| record)
            .collect();
        Ok((page, total))
    }

    async fn list(&self) -> Result<Vec<MetadataRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<MetadataRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn insert(&self, record: MetadataRecord) -> Result<MetadataRecord> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id == record.id) {
            return Err(Error::RecordExists(record.id));
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        id: &str,
        metadata: Map<String, JsonValue>,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome> {
        let mut records = self.records.write().await;
        let Some(record) = records.iter_mut().find(|r| r.id == id) else {
            return Ok(UpdateOutcome::NotFound);
        };
        if record.metadata == metadata {
            return Ok(UpdateOutcome::Unchanged);
        }
        record.metadata = metadata;
        record.updated_at = updated_at;
        Ok(UpdateOutcome::Updated(record.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id != id);
        Ok(records.len() != before)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}

fn compare_documents(a: &JsonValue, b: &JsonValue, sort: &[SortSpec]) -> Ordering {
    for spec in sort {
        let ord = compare_values(lookup_path(a, &spec.path), lookup_path(b, &spec.path));
        let ord = match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

// Missing and null first, then numbers, strings, objects, arrays, booleans.
fn type_rank(value: Option<&JsonValue>) -> u8 {
    match value {
        None | Some(JsonValue::Null) => 0,
        Some(JsonValue::Number(_)) => 1,
        Some(JsonValue::String(_)) => 2,
        Some(JsonValue::Object(_)) => 3,
        Some(JsonValue::Array(_)) => 4,
        Some(JsonValue::Bool(_)) => 5,
    }
}

fn compare_values(a: Option<&JsonValue>, b: Option<&JsonValue>) -> Ordering {
    match (a, b) {
        (Some(JsonValue::Number(x)), Some(JsonValue::Number(y))) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(JsonValue::String(x)), Some(JsonValue::String(y))) => x.cmp(y),
        (Some(JsonValue::Bool(x)), Some(JsonValue::Bool(y))) => x.cmp(y),
        (Some(JsonValue::Array(x)), Some(JsonValue::Array(y))) => {
            for (xi, yi) in x.iter().zip(y.iter()) {
                let ord = compare_values(Some(xi), Some(yi));
                if ord != Ordering::Equal {
                    return ord;
                }
            }
            x.len().cmp(&y.len())
        }
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}
