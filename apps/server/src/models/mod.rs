//! Domain models for the metadata server

pub mod record;

pub use record::{is_record_id, MetadataRecord, RecordPayload, UpdateOutcome};
