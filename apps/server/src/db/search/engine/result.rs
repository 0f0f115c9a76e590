use serde::Serialize;

use crate::db::search::filter::CompoundFilter;
use crate::db::search::params::SearchRequest;
use crate::models::MetadataRecord;

/// Successful search envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub success: bool,
    pub validated_params: SearchRequest,
    pub filter: CompoundFilter,
    pub records: Vec<MetadataRecord>,
    pub total_count: u64,
    pub returned_count: usize,
    pub has_more: bool,
}

/// Why a search was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectionKind {
    /// Unknown fields or invalid values supplied by the caller
    Input,
    /// Storage or configuration fault
    Internal,
}

/// Failed search envelope.
#[derive(Debug, Clone, Serialize)]
pub struct SearchRejection {
    pub success: bool,
    pub errors: Vec<String>,
    #[serde(skip)]
    pub kind: RejectionKind,
}

impl SearchRejection {
    pub fn input(errors: Vec<String>) -> Self {
        Self {
            success: false,
            errors,
            kind: RejectionKind::Input,
        }
    }

    pub fn internal(message: &str) -> Self {
        Self {
            success: false,
            errors: vec![message.to_string()],
            kind: RejectionKind::Internal,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum SearchResponse {
    Matched(SearchResult),
    Rejected(SearchRejection),
}

impl SearchResponse {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            Self::Matched(r) => Some(r),
            Self::Rejected(_) => None,
        }
    }

    pub fn rejection(&self) -> Option<&SearchRejection> {
        match self {
            Self::Matched(_) => None,
            Self::Rejected(r) => Some(r),
        }
    }

    pub(super) fn outcome_label(&self) -> &'static str {
        match self {
            Self::Matched(_) => "success",
            Self::Rejected(r) if r.kind == RejectionKind::Input => "invalid",
            Self::Rejected(_) => "error",
        }
    }
}
