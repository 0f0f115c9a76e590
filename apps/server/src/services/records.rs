//! Record service
//!
//! CRUD business logic over a [`RecordStore`]: id checks, payload
//! validation against the current option lists, UUID assignment.

use chrono::Utc;
use std::sync::Arc;

use super::options::OptionsCatalog;
use super::validation::{validate_metadata, validate_record_id};
use crate::db::RecordStore;
use crate::models::{is_record_id, MetadataRecord, RecordPayload, UpdateOutcome};
use crate::{Error, Result};

pub struct RecordService {
    store: Arc<dyn RecordStore>,
    options: Arc<OptionsCatalog>,
}

/// Parse a path id, rejecting anything that is not a UUID.
fn parse_path_id(id: &str) -> Result<()> {
    if is_record_id(id) {
        Ok(())
    } else {
        Err(Error::InvalidId(id.to_string()))
    }
}

impl RecordService {
    pub fn new(store: Arc<dyn RecordStore>, options: Arc<OptionsCatalog>) -> Self {
        Self { store, options }
    }

    pub async fn list(&self) -> Result<Vec<MetadataRecord>> {
        self.store.list().await
    }

    pub async fn get(&self, id: &str) -> Result<MetadataRecord> {
        parse_path_id(id)?;
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::RecordNotFound(id.to_string()))
    }

    /// Create a record, generating a UUID when the payload has none.
    pub async fn create(&self, payload: RecordPayload) -> Result<MetadataRecord> {
        if let Some(id) = &payload.id {
            validate_record_id(id)?;
        }
        let metadata = validate_metadata(payload.metadata.as_ref(), &self.options.current())?;
        let id = payload
            .id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let record = self
            .store
            .insert(MetadataRecord::new(id, metadata))
            .await?;
        tracing::info!(id = %record.id, "Record created");
        Ok(record)
    }

    /// Replace a record's metadata. The path id wins over any id in the body.
    ///
    /// Returns [`UpdateOutcome::Unchanged`] when the stored metadata is
    /// identical; a missing record is an error.
    pub async fn update(&self, id: &str, payload: RecordPayload) -> Result<UpdateOutcome> {
        parse_path_id(id)?;
        let metadata = validate_metadata(payload.metadata.as_ref(), &self.options.current())?;

        match self.store.update(id, metadata, Utc::now()).await? {
            UpdateOutcome::NotFound => Err(Error::RecordNotFound(id.to_string())),
            outcome => {
                if matches!(outcome, UpdateOutcome::Updated(_)) {
                    tracing::info!(id, "Record updated");
                }
                Ok(outcome)
            }
        }
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        parse_path_id(id)?;
        if !self.store.delete(id).await? {
            return Err(Error::RecordNotFound(id.to_string()));
        }
        tracing::info!(id, "Record deleted");
        Ok(())
    }
}
