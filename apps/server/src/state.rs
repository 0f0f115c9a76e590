//! Shared application state

use std::sync::Arc;

use crate::config::{Config, StorageBackend};
use crate::db::{FieldRegistry, MemoryRecordStore, PostgresRecordStore, RecordStore, SearchEngine};
use crate::services::{OptionsCatalog, RecordService, SearchService};
use crate::Result;

/// State handed to every handler. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub options: Arc<OptionsCatalog>,
    pub record_service: Arc<RecordService>,
    pub search_service: Arc<SearchService>,
}

impl AppState {
    /// Build state from configuration, connecting to the configured store.
    pub async fn new(config: Config) -> Result<Self> {
        let store = open_store(&config).await?;
        Self::with_store(config, store)
    }

    /// Build state over an existing store.
    pub fn with_store(config: Config, store: Arc<dyn RecordStore>) -> Result<Self> {
        let registry = Arc::new(FieldRegistry::with_extra_fields(
            config.search.extra_field_configs()?,
        )?);
        crate::metrics::SEARCH_FIELDS_REGISTERED.set(registry.len() as i64);

        let options = Arc::new(OptionsCatalog::load(config.options.directory.clone()));
        let engine = Arc::new(SearchEngine::from_config(
            Arc::clone(&store),
            Arc::clone(&registry),
            &config.search,
        ));

        tracing::info!(
            backend = store.backend_name(),
            search_fields = registry.len(),
            options_directory = %config.options.directory.display(),
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            record_service: Arc::new(RecordService::new(
                Arc::clone(&store),
                Arc::clone(&options),
            )),
            search_service: Arc::new(SearchService::new(engine)),
            options,
        })
    }
}

async fn open_store(config: &Config) -> Result<Arc<dyn RecordStore>> {
    match config.database.backend {
        StorageBackend::Memory => Ok(Arc::new(MemoryRecordStore::new())),
        StorageBackend::Postgres => match PostgresRecordStore::connect(&config.database).await {
            Ok(store) => Ok(Arc::new(store)),
            Err(e) if config.database.fallback_to_memory => {
                tracing::warn!(
                    error = %e,
                    "PostgreSQL unavailable, continuing with the in-memory store"
                );
                Ok(Arc::new(MemoryRecordStore::new()))
            }
            Err(e) => Err(e),
        },
    }
}
