//! Server configuration
//!
//! Sources are layered, later ones winning:
//! 1. built-in defaults ([`DEFAULT_CONFIG`])
//! 2. an optional TOML file (`--config` or `METADATA_CONFIG`)
//! 3. environment variables prefixed `METADATA__`, nested with `__`
//!    (e.g. `METADATA__SERVER__PORT=8080`, `METADATA__DATABASE__BACKEND=postgres`)

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::db::search::{SearchFieldConfig, SearchFieldSpec};

/// Environment variable naming the configuration file.
pub const CONFIG_PATH_ENV: &str = "METADATA_CONFIG";

const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 5000
cors_origins = ["*"]
max_request_body_size = 1048576

[database]
backend = "memory"
pool_min_size = 1
pool_max_size = 10
pool_timeout_seconds = 5
run_migrations = true
fallback_to_memory = true

[search]
default_limit = 100
max_limit = 1000

[options]
directory = "data"

[logging]
level = "info"
json = false
file_enabled = false
file_directory = "logs"
file_prefix = "metadata-server"
file_rotation = "daily"
service_name = "metadata-server"
"#;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub search: SearchConfig,
    pub options: OptionsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins; `*` allows any origin
    #[serde(default)]
    pub cors_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub backend: StorageBackend,
    #[serde(default)]
    pub url: Option<String>,
    pub pool_min_size: u32,
    pub pool_max_size: u32,
    pub pool_timeout_seconds: u64,
    pub run_migrations: bool,
    /// Use the in-memory store when PostgreSQL cannot be reached at startup
    pub fallback_to_memory: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SearchConfig {
    pub default_limit: usize,
    pub max_limit: usize,
    /// Upper bound for the storage call of one search
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Searchable fields registered at startup in addition to the built-ins
    #[serde(default)]
    pub extra_fields: Vec<SearchFieldSpec>,
}

impl SearchConfig {
    /// Compile `extra_fields` into registry entries.
    pub fn extra_field_configs(&self) -> crate::Result<Vec<SearchFieldConfig>> {
        self.extra_fields
            .iter()
            .cloned()
            .map(|spec| spec.into_config().map_err(crate::Error::from))
            .collect()
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 100,
            max_limit: 1000,
            timeout_ms: None,
            extra_fields: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OptionsConfig {
    /// Directory holding `<kind>-options.json` files
    pub directory: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
    pub file_enabled: bool,
    pub file_directory: String,
    pub file_prefix: String,
    /// `daily`, `hourly`, `minutely` or `never`
    pub file_rotation: String,
    pub service_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration from defaults, an optional file and the environment.
    ///
    /// `path` takes precedence over `METADATA_CONFIG`. A path that was given
    /// explicitly must exist.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let env_path = std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from);
        let file = path.map(Path::to_path_buf).or(env_path);

        let mut builder = config::Config::builder().add_source(config::File::from_str(
            DEFAULT_CONFIG,
            config::FileFormat::Toml,
        ));
        if let Some(file) = &file {
            builder = builder.add_source(config::File::from(file.as_path()).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix("METADATA")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("server.cors_origins"),
        );

        let config: Config = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Built-in defaults without touching the filesystem or environment.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(
                DEFAULT_CONFIG,
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(|c| c.try_deserialize())
            .expect("built-in default config must deserialize")
    }

    /// Reject inconsistent settings before anything starts.
    pub fn validate(&self) -> crate::Result<()> {
        let fail = |msg: String| Err(crate::Error::Config(msg));

        if self.search.default_limit == 0 {
            return fail("search.default_limit must be greater than 0".into());
        }
        if self.search.max_limit < self.search.default_limit {
            return fail(format!(
                "search.max_limit ({}) must be at least search.default_limit ({})",
                self.search.max_limit, self.search.default_limit
            ));
        }
        if self.search.timeout_ms == Some(0) {
            return fail("search.timeout_ms must be greater than 0 when set".into());
        }
        if self.database.backend == StorageBackend::Postgres && self.database.url.is_none() {
            return fail("database.url is required when database.backend = \"postgres\"".into());
        }
        if self.database.pool_max_size == 0
            || self.database.pool_min_size > self.database.pool_max_size
        {
            return fail(format!(
                "database pool sizes are inconsistent (min {}, max {})",
                self.database.pool_min_size, self.database.pool_max_size
            ));
        }
        if !matches!(
            self.logging.file_rotation.as_str(),
            "daily" | "hourly" | "minutely" | "never"
        ) {
            return fail(format!(
                "logging.file_rotation must be daily, hourly, minutely or never (got {})",
                self.logging.file_rotation
            ));
        }
        self.search.extra_field_configs()?;
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
