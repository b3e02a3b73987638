//! Schema for the PostgreSQL document store
//!
//! Every collection shares one `documents` table. `seq` gives a stable
//! insertion order; `created_at` uses `clock_timestamp()` so rows of a
//! single batch still get distinct timestamps.

use sqlx::PgPool;

/// Create tables and indexes if they do not exist yet.
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running document store migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS documents (
            id UUID PRIMARY KEY,
            seq BIGSERIAL NOT NULL,
            collection TEXT NOT NULL,
            body JSONB NOT NULL DEFAULT '{}'::jsonb,
            created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_documents_collection_seq
        ON documents (collection, seq)
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_documents_collection_created
        ON documents (collection, created_at DESC, seq DESC)
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Document store migrations complete");
    Ok(())
}
