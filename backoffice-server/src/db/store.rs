//! Document store abstraction
//!
//! A store holds named collections of JSON documents. Every document
//! gets a store-assigned `id` and `createdAt` on insert. The trait is
//! the seam between the connection manager / repositories and the
//! concrete backend (PostgreSQL JSONB in production, in-memory for
//! tests and `serve --memory`).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backoffice_core::{Fields, Record};
use serde_json::Value;

/// Order in which `find_all` returns documents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Insertion order
    Inserted,
    /// `createdAt` descending, ties newest insert first
    NewestFirst,
}

/// Store-level error
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No open connection
    #[error("document store unavailable: not connected")]
    Unavailable,

    /// Opening a connection failed (drives the retry loop)
    #[error("connection failed: {0}")]
    Connection(String),

    /// Insert/update/delete rejected by the store
    #[error("write rejected: {reason}")]
    Write { reason: String, inserted: usize },

    /// Read failed
    #[error("query failed: {0}")]
    Query(String),
}

impl StoreError {
    pub fn write(reason: impl Into<String>) -> Self {
        Self::Write {
            reason: reason.into(),
            inserted: 0,
        }
    }
}

/// Operations the repositories need from a document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Host the store is connected to, for logs and health output.
    fn host_label(&self) -> &str;

    /// Names of collections that currently hold documents.
    async fn list_collections(&self) -> Result<Vec<String>, StoreError>;

    async fn count(&self, collection: &str) -> Result<u64, StoreError>;

    async fn find_all(&self, collection: &str, order: SortOrder) -> Result<Vec<Record>, StoreError>;

    /// First document whose top-level `field` equals `value`.
    async fn find_one_by(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<Record>, StoreError>;

    async fn insert_one(&self, collection: &str, body: Fields) -> Result<Record, StoreError>;

    /// Insert in order, stopping at the first failure.
    ///
    /// Documents inserted before the failure stay; the error's
    /// `inserted` count says how many.
    async fn insert_many(&self, collection: &str, bodies: Vec<Fields>) -> Result<Vec<Record>, StoreError>;

    /// Set one top-level field on the document with `id`.
    ///
    /// Returns the updated document, or `None` when no document has
    /// that id.
    async fn set_field(
        &self,
        collection: &str,
        id: &str,
        field: &str,
        value: Value,
    ) -> Result<Option<Record>, StoreError>;

    /// Remove every document in the collection, returning how many.
    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError>;
}

/// Opens a document store from a connection string.
#[async_trait]
pub trait Connector: Send + Sync + 'static {
    async fn connect(&self, uri: &str, timeout: Duration) -> Result<Arc<dyn DocumentStore>, StoreError>;
}
