//! Field registry - the catalog of searchable fields
//!
//! The registry is built once at startup and may be extended at runtime through
//! [`FieldRegistry::register`]. Readers work on an immutable snapshot of the
//! field map; registration builds a new map and swaps it in under the write
//! lock, so a reader never observes a half-applied update.

use serde::Serialize;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::error::SearchError;
use super::fields::{default_fields, MatchKind, SearchFieldConfig};

type FieldMap = HashMap<String, Arc<SearchFieldConfig>>;

/// Public description of a searchable field (for documentation and forms).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldSummary {
    #[serde(skip)]
    pub name: String,
    pub label: String,
    pub description: String,
    #[serde(rename = "type")]
    pub match_kind: MatchKind,
}

/// Catalog of searchable fields keyed by field name.
#[derive(Debug)]
pub struct FieldRegistry {
    fields: RwLock<Arc<FieldMap>>,
}

impl Default for FieldRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FieldRegistry {
    /// Registry with no fields.
    pub fn empty() -> Self {
        Self {
            fields: RwLock::new(Arc::new(HashMap::new())),
        }
    }

    /// Registry pre-populated with the built-in fields.
    pub fn with_defaults() -> Self {
        let map = default_fields()
            .into_iter()
            .map(|f| (f.name.clone(), Arc::new(f)))
            .collect();
        Self {
            fields: RwLock::new(Arc::new(map)),
        }
    }

    /// Build a registry from the built-in fields plus `extra` entries.
    ///
    /// Fails on the first extra entry whose name is already taken.
    pub fn with_extra_fields(
        extra: impl IntoIterator<Item = SearchFieldConfig>,
    ) -> Result<Self, SearchError> {
        let registry = Self::with_defaults();
        for field in extra {
            registry.register(field)?;
        }
        Ok(registry)
    }

    fn snapshot(&self) -> Arc<FieldMap> {
        let guard = self.fields.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Look up a field configuration by name.
    pub fn lookup(&self, name: &str) -> Option<Arc<SearchFieldConfig>> {
        self.snapshot().get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.snapshot().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// All fields, ordered by field name.
    pub fn list_all(&self) -> Vec<FieldSummary> {
        let snapshot = self.snapshot();
        let mut fields: Vec<FieldSummary> = snapshot
            .values()
            .map(|f| FieldSummary {
                name: f.name.clone(),
                label: f.label.clone(),
                description: f.description.clone(),
                match_kind: f.match_kind,
            })
            .collect();
        fields.sort_by(|a, b| a.name.cmp(&b.name));
        fields
    }

    /// Add a searchable field.
    ///
    /// Existing entries are never replaced: registering a name that is
    /// already present fails with `FieldAlreadyRegistered`.
    pub fn register(&self, field: SearchFieldConfig) -> Result<(), SearchError> {
        let mut guard = self.fields.write().unwrap_or_else(|e| e.into_inner());
        if guard.contains_key(&field.name) {
            return Err(SearchError::FieldAlreadyRegistered(field.name));
        }

        let mut next: FieldMap = (**guard).clone();
        tracing::info!(
            field = %field.name,
            path = %field.path,
            match_kind = %field.match_kind,
            "Registered search field"
        );
        next.insert(field.name.clone(), Arc::new(field));
        *guard = Arc::new(next);
        Ok(())
    }
}
