//! Metadata records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value as JsonValue};

/// A stored metadata record.
///
/// `metadata` is free-form: known keys are validated on write, any other key
/// is stored verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataRecord {
    pub id: String,
    pub metadata: Map<String, JsonValue>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MetadataRecord {
    pub fn new(id: String, metadata: Map<String, JsonValue>) -> Self {
        let now = Utc::now();
        Self {
            id,
            metadata,
            created_at: now,
            updated_at: now,
        }
    }

    /// The searchable document, the shape search paths address.
    ///
    /// Only `id` and `metadata` are addressable; timestamps are not part of
    /// the document in any backend.
    pub fn to_document(&self) -> JsonValue {
        Self::document(&self.id, &self.metadata)
    }

    /// Searchable document for an id and its metadata.
    pub fn document(id: &str, metadata: &Map<String, JsonValue>) -> JsonValue {
        json!({ "id": id, "metadata": metadata })
    }
}

/// Whether `raw` is a record id: a UUID in hyphenated form.
///
/// The simple, braced and URN spellings are refused so that an id has exactly
/// one textual form in storage and in search values.
pub fn is_record_id(raw: &str) -> bool {
    raw.len() == 36 && uuid::Uuid::try_parse(raw).is_ok()
}

/// Request body for creating or replacing a record.
///
/// Both members are optional at the serde level so that a missing
/// `metadata` is reported by validation rather than by deserialization.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordPayload {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub metadata: Option<JsonValue>,
}

/// Result of an update.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// Metadata changed (HTTP 200)
    Updated(MetadataRecord),
    /// Metadata identical to the stored one (HTTP 304)
    Unchanged,
    /// No record with that id (HTTP 404)
    NotFound,
}
