//! Database layer - record stores and search

pub mod memory;
pub mod postgres;
pub mod search;
pub mod traits;

pub use memory::MemoryRecordStore;
pub use postgres::PostgresRecordStore;
pub use search::{FieldRegistry, SearchEngine};
pub use traits::RecordStore;
