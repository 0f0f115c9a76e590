//! Options catalog - selectable values for record fields
//!
//! Lists are read from `<directory>/<kind>-options.json` (a JSON array of
//! strings). A missing or malformed file falls back to the built-in list.
//! [`OptionsCatalog::reload`] re-reads every file and swaps the whole set in
//! at once.

use serde::Serialize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    Genre,
    Dialect,
    Source,
}

impl OptionKind {
    pub const ALL: [OptionKind; 3] = [Self::Genre, Self::Dialect, Self::Source];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Genre => "genre",
            Self::Dialect => "dialect",
            Self::Source => "source",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{}-options.json", self.as_str())
    }

    pub fn fallback(&self) -> Vec<String> {
        let values: &[&str] = match self {
            Self::Genre => &[
                "literature",
                "language",
                "new testament",
                "old testament",
                "magazine",
                "apocrypha",
                "academic",
            ],
            Self::Dialect => &["urmi", "standard", "other"],
            Self::Source => &["private", "online", "published"],
        };
        values.iter().map(|s| s.to_string()).collect()
    }
}

/// One snapshot of every option list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionLists {
    pub genre: Vec<String>,
    pub dialect: Vec<String>,
    pub source: Vec<String>,
}

impl OptionLists {
    pub fn get(&self, kind: OptionKind) -> &[String] {
        match kind {
            OptionKind::Genre => &self.genre,
            OptionKind::Dialect => &self.dialect,
            OptionKind::Source => &self.source,
        }
    }

    pub fn fallback() -> Self {
        Self {
            genre: OptionKind::Genre.fallback(),
            dialect: OptionKind::Dialect.fallback(),
            source: OptionKind::Source.fallback(),
        }
    }

    fn read_from(directory: &Path) -> Self {
        Self {
            genre: read_list(directory, OptionKind::Genre),
            dialect: read_list(directory, OptionKind::Dialect),
            source: read_list(directory, OptionKind::Source),
        }
    }
}

fn read_list(directory: &Path, kind: OptionKind) -> Vec<String> {
    let path = directory.join(kind.file_name());
    let parsed = std::fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|content| {
            serde_json::from_str::<Vec<String>>(&content).map_err(|e| e.to_string())
        });

    match parsed {
        Ok(values) => values,
        Err(error) => {
            tracing::warn!(
                kind = kind.as_str(),
                path = %path.display(),
                %error,
                "Failed to load options, using built-in list"
            );
            kind.fallback()
        }
    }
}

#[derive(Debug)]
pub struct OptionsCatalog {
    directory: PathBuf,
    lists: RwLock<Arc<OptionLists>>,
}

impl OptionsCatalog {
    /// Load every list from `directory`.
    pub fn load(directory: impl Into<PathBuf>) -> Self {
        let directory = directory.into();
        let lists = OptionLists::read_from(&directory);
        Self {
            directory,
            lists: RwLock::new(Arc::new(lists)),
        }
    }

    /// Catalog with the built-in lists only.
    pub fn fallback() -> Self {
        Self {
            directory: PathBuf::new(),
            lists: RwLock::new(Arc::new(OptionLists::fallback())),
        }
    }

    pub fn current(&self) -> Arc<OptionLists> {
        let guard = self.lists.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Re-read all files and publish the new lists.
    pub fn reload(&self) -> Arc<OptionLists> {
        let fresh = Arc::new(OptionLists::read_from(&self.directory));
        let mut guard = self.lists.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::clone(&fresh);
        tracing::info!(
            directory = %self.directory.display(),
            genres = fresh.genre.len(),
            dialects = fresh.dialect.len(),
            sources = fresh.source.len(),
            "Options reloaded"
        );
        fresh
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}
