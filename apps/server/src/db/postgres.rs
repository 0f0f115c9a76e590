//! PostgreSQL record store
//!
//! Records live in `metadata_records` as JSONB documents. Search filters are
//! compiled to SQL by [`QueryBuilder`]; every value is bound, never
//! interpolated.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value as JsonValue};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use std::time::Duration;

use super::search::query_builder::{BindValue, QueryBuilder, RECORD_COLUMNS};
use super::search::{CompoundFilter, SearchOptions};
use super::traits::RecordStore;
use crate::config::DatabaseConfig;
use crate::models::{MetadataRecord, UpdateOutcome};
use crate::{Error, Result};

#[derive(Clone)]
pub struct PostgresRecordStore {
    pool: PgPool,
}

impl PostgresRecordStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool from configuration and optionally run migrations.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| Error::Config("database.url is required for postgres".to_string()))?;

        let pool = PgPoolOptions::new()
            .max_connections(config.pool_max_size)
            .min_connections(config.pool_min_size)
            .acquire_timeout(Duration::from_secs(config.pool_timeout_seconds))
            .connect(url)
            .await?;

        let store = Self::new(pool);
        if config.run_migrations {
            store.migrate().await?;
        }
        Ok(store)
    }

    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| Error::Storage(format!("migration failed: {e}")))?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn bind_all<'q>(
    mut query: sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments>,
    binds: Vec<BindValue>,
) -> sqlx::query::Query<'q, sqlx::Postgres, sqlx::postgres::PgArguments> {
    for value in binds {
        query = match value {
            BindValue::Text(v) => query.bind(v),
            BindValue::TextArray(vs) => query.bind(vs),
            BindValue::Json(v) => query.bind(v),
            BindValue::BigInt(v) => query.bind(v),
        };
    }
    query
}

fn record_from_row(row: &PgRow) -> Result<MetadataRecord> {
    let metadata: JsonValue = row.try_get("metadata")?;
    let metadata = match metadata {
        JsonValue::Object(map) => map,
        other => {
            return Err(Error::Storage(format!(
                "stored metadata is not an object: {other}"
            )))
        }
    };
    Ok(MetadataRecord {
        id: row.try_get("id")?,
        metadata,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

#[async_trait]
impl RecordStore for PostgresRecordStore {
    async fn find(
        &self,
        filter: &CompoundFilter,
        options: &SearchOptions,
    ) -> Result<Vec<MetadataRecord>> {
        let (sql, binds) = QueryBuilder::new(filter).build_sql(options);
        tracing::trace!(sql = %sql, "find records");

        let rows = bind_all(sqlx::query(&sql), binds)
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn count(&self, filter: &CompoundFilter) -> Result<u64> {
        let (sql, binds) = QueryBuilder::new(filter).build_count_sql();

        let mut query = sqlx::query_scalar::<_, i64>(&sql);
        for value in binds {
            query = match value {
                BindValue::Text(v) => query.bind(v),
                BindValue::TextArray(vs) => query.bind(vs),
                BindValue::Json(v) => query.bind(v),
                BindValue::BigInt(v) => query.bind(v),
            };
        }

        let total = query.fetch_one(&self.pool).await?;
        Ok(u64::try_from(total).unwrap_or(0))
    }

    async fn list(&self) -> Result<Vec<MetadataRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM metadata_records ORDER BY seq");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(record_from_row).collect()
    }

    async fn get(&self, id: &str) -> Result<Option<MetadataRecord>> {
        let sql = format!("SELECT {RECORD_COLUMNS} FROM metadata_records WHERE id = $1");
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(record_from_row).transpose()
    }

    async fn insert(&self, record: MetadataRecord) -> Result<MetadataRecord> {
        let result = sqlx::query(
            r#"
            INSERT INTO metadata_records (id, document, created_at, updated_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&record.id)
        .bind(record.to_document())
        .bind(record.created_at)
        .bind(record.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::RecordExists(record.id));
        }
        Ok(record)
    }

    async fn update(
        &self,
        id: &str,
        metadata: Map<String, JsonValue>,
        updated_at: DateTime<Utc>,
    ) -> Result<UpdateOutcome> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("SELECT {RECORD_COLUMNS} FROM metadata_records WHERE id = $1 FOR UPDATE");
        let Some(row) = sqlx::query(&sql).bind(id).fetch_optional(&mut *tx).await? else {
            return Ok(UpdateOutcome::NotFound);
        };
        let mut current = record_from_row(&row)?;
        if current.metadata == metadata {
            return Ok(UpdateOutcome::Unchanged);
        }

        sqlx::query("UPDATE metadata_records SET document = $2, updated_at = $3 WHERE id = $1")
            .bind(id)
            .bind(MetadataRecord::document(id, &metadata))
            .bind(updated_at)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        current.metadata = metadata;
        current.updated_at = updated_at;
        Ok(UpdateOutcome::Updated(current))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM metadata_records WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    fn backend_name(&self) -> &'static str {
        "postgres"
    }
}
