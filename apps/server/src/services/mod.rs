//! Business logic services

pub mod fields;
pub mod options;
pub mod records;
pub mod search;
pub mod validation;

pub use fields::{predefined_fields, FieldDefinition, FieldDefinitions, FieldType};
pub use options::{OptionKind, OptionLists, OptionsCatalog};
pub use records::RecordService;
pub use search::SearchService;
