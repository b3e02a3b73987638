//! PostgreSQL-backed document store
//!
//! Documents are JSONB bodies in a single `documents` table keyed by
//! collection. Uses sqlx PgPool with explicit connection limits.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backoffice_core::{Fields, Record};
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::migrations;
use super::store::{Connector, DocumentStore, SortOrder, StoreError};

/// Default maximum connections for the pool.
/// Kept low for a single back-office instance.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Create a PostgreSQL connection pool with custom options.
///
/// # Arguments
///
/// * `options` - parsed connection options
/// * `max_connections` - Maximum number of connections in the pool
/// * `acquire_timeout` - bound on establishing/acquiring a connection
pub async fn create_pool_with_options(
    options: PgConnectOptions,
    max_connections: u32,
    acquire_timeout: Duration,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(acquire_timeout)
        .connect_with(options)
        .await
}

/// Document row as stored
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Fields>,
    created_at: DateTime<Utc>,
}

impl From<DocumentRow> for Record {
    fn from(row: DocumentRow) -> Self {
        Record::new(row.id.to_string(), row.created_at, row.body.0)
    }
}

fn query_err(e: sqlx::Error) -> StoreError {
    StoreError::Query(e.to_string())
}

fn write_err(e: sqlx::Error) -> StoreError {
    StoreError::write(e.to_string())
}

/// Document store over a PostgreSQL pool
pub struct PgDocumentStore {
    pool: PgPool,
    host: String,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool, host: impl Into<String>) -> Self {
        Self {
            pool,
            host: host.into(),
        }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn host_label(&self) -> &str {
        &self.host
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        sqlx::query_scalar("SELECT DISTINCT collection FROM documents ORDER BY collection")
            .fetch_all(&self.pool)
            .await
            .map_err(query_err)
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM documents WHERE collection = $1")
            .bind(collection)
            .fetch_one(&self.pool)
            .await
            .map_err(query_err)?;
        Ok(count as u64)
    }

    async fn find_all(&self, collection: &str, order: SortOrder) -> Result<Vec<Record>, StoreError> {
        // ORDER BY variants are fixed strings, not user input
        let sql = match order {
            SortOrder::Inserted => {
                "SELECT id, body, created_at FROM documents WHERE collection = $1 ORDER BY seq ASC"
            }
            SortOrder::NewestFirst => {
                "SELECT id, body, created_at FROM documents WHERE collection = $1 \
                 ORDER BY created_at DESC, seq DESC"
            }
        };

        let rows: Vec<DocumentRow> = sqlx::query_as(sql)
            .bind(collection)
            .fetch_all(&self.pool)
            .await
            .map_err(query_err)?;

        Ok(rows.into_iter().map(Record::from).collect())
    }

    async fn find_one_by(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<Record>, StoreError> {
        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            SELECT id, body, created_at
            FROM documents
            WHERE collection = $1 AND body -> $2 = $3
            ORDER BY seq ASC
            LIMIT 1
            "#,
        )
        .bind(collection)
        .bind(field)
        .bind(Json(value))
        .fetch_optional(&self.pool)
        .await
        .map_err(query_err)?;

        Ok(row.map(Record::from))
    }

    async fn insert_one(&self, collection: &str, body: Fields) -> Result<Record, StoreError> {
        let row: DocumentRow = sqlx::query_as(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            RETURNING id, body, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(collection)
        .bind(Json(body))
        .fetch_one(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(row.into())
    }

    async fn insert_many(&self, collection: &str, bodies: Vec<Fields>) -> Result<Vec<Record>, StoreError> {
        // Ordered, no transaction: rows before a failure are kept
        let mut inserted = Vec::with_capacity(bodies.len());
        for body in bodies {
            match self.insert_one(collection, body).await {
                Ok(record) => inserted.push(record),
                Err(StoreError::Write { reason, .. }) => {
                    return Err(StoreError::Write {
                        reason,
                        inserted: inserted.len(),
                    })
                }
                Err(other) => return Err(other),
            }
        }
        Ok(inserted)
    }

    async fn set_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<Record>, StoreError> {
        let Ok(id) = Uuid::parse_str(id) else {
            return Ok(None);
        };

        let row: Option<DocumentRow> = sqlx::query_as(
            r#"
            UPDATE documents
            SET body = jsonb_set(body, ARRAY[$3], $4, true)
            WHERE collection = $1 AND id = $2
            RETURNING id, body, created_at
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(field)
        .bind(Json(value))
        .fetch_optional(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(row.map(Record::from))
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1")
            .bind(collection)
            .execute(&self.pool)
            .await
            .map_err(write_err)?;
        Ok(result.rows_affected())
    }
}

/// Opens a pooled PostgreSQL document store and runs migrations.
pub struct PgConnector {
    max_connections: u32,
}

impl PgConnector {
    pub fn new(max_connections: u32) -> Self {
        Self { max_connections }
    }
}

impl Default for PgConnector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONNECTIONS)
    }
}

#[async_trait]
impl Connector for PgConnector {
    async fn connect(&self, uri: &str, timeout: Duration) -> Result<Arc<dyn DocumentStore>, StoreError> {
        let options: PgConnectOptions = uri
            .parse()
            .map_err(|e: sqlx::Error| StoreError::Connection(e.to_string()))?;
        let host = options.get_host().to_string();

        let pool = create_pool_with_options(options, self.max_connections, timeout)
            .await
            .map_err(|e| StoreError::Connection(e.to_string()))?;

        migrations::run(&pool)
            .await
            .map_err(|e| StoreError::Connection(format!("migrations failed: {}", e)))?;

        let store: Arc<dyn DocumentStore> = Arc::new(PgDocumentStore::new(pool, host));
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p backoffice-server -- --ignored

    async fn connect() -> Arc<dyn DocumentStore> {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        PgConnector::default()
            .connect(&url, Duration::from_secs(5))
            .await
            .expect("connect failed")
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn round_trips_document() {
        let store = connect().await;
        let collection = format!("test_{}", Uuid::new_v4().simple());
        let body = json!({"name": "Ann", "status": "unread"}).as_object().cloned().unwrap();

        let created = store.insert_one(&collection, body).await.expect("insert failed");
        let all = store
            .find_all(&collection, SortOrder::NewestFirst)
            .await
            .expect("query failed");
        assert_eq!(all, vec![created.clone()]);

        let updated = store
            .set_field(&collection, &created.id, "status", json!("read"))
            .await
            .expect("update failed")
            .expect("document missing");
        assert_eq!(updated.get_str("status"), Some("read"));

        assert_eq!(store.delete_all(&collection).await.expect("delete failed"), 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn malformed_id_is_not_found() {
        let store = connect().await;
        let updated = store
            .set_field("contacts", "not-a-uuid", "status", json!("read"))
            .await
            .expect("update failed");
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn bad_connection_string_is_connection_error() {
        let err = PgConnector::default()
            .connect("not a url", Duration::from_millis(10))
            .await
            .err()
            .expect("expected failure");
        assert!(matches!(err, StoreError::Connection(_)));
    }
}
