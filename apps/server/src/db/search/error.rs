//! Search subsystem errors

use thiserror::Error;

/// Errors raised while validating, building or executing a search.
///
/// `UnknownField` and `InvalidValue` are caller mistakes and are collected
/// across all supplied fields. The others are configuration or operational
/// faults.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("Unknown search field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Unsupported match kind: {0}")]
    UnsupportedMatchKind(String),

    #[error("Search field already registered: {0}")]
    FieldAlreadyRegistered(String),

    #[error("Invalid search field definition: {0}")]
    InvalidFieldDefinition(String),

    #[error("Storage fault: {0}")]
    StorageFault(String),
}

impl SearchError {
    pub fn invalid_value(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller's input.
    pub fn is_input_error(&self) -> bool {
        matches!(self, Self::UnknownField(_) | Self::InvalidValue { .. })
    }
}
