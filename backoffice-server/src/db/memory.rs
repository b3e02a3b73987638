//! In-process document store
//!
//! Backs the test suite and `serve --memory`. Same observable
//! semantics as the PostgreSQL store: UUID ids, insertion-order
//! sequence for tie-breaking, ordered inserts that stop at the first
//! failure.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use backoffice_core::{Fields, Record};
use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::store::{Connector, DocumentStore, SortOrder, StoreError};

#[derive(Debug, Clone)]
struct Stored {
    seq: u64,
    record: Record,
}

#[derive(Default)]
struct Collections {
    docs: HashMap<String, Vec<Stored>>,
    next_seq: u64,
    /// Inserts still accepted before writes start failing; `None` = unlimited
    insert_budget: Option<usize>,
}

/// Document store held entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Collections>,
    operations: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept `n` more document inserts, then reject every insert.
    pub async fn reject_inserts_after(&self, n: usize) {
        self.inner.lock().await.insert_budget = Some(n);
    }

    /// Number of store operations served so far.
    pub fn operations(&self) -> u64 {
        self.operations.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

impl Collections {
    fn insert(&mut self, collection: &str, body: Fields) -> Result<Record, StoreError> {
        if let Some(budget) = self.insert_budget.as_mut() {
            if *budget == 0 {
                return Err(StoreError::write("insert budget exhausted"));
            }
            *budget -= 1;
        }

        self.next_seq += 1;
        let record = Record::new(Uuid::new_v4().to_string(), Utc::now(), body);
        self.docs
            .entry(collection.to_string())
            .or_default()
            .push(Stored {
                seq: self.next_seq,
                record: record.clone(),
            });
        Ok(record)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn host_label(&self) -> &str {
        "memory"
    }

    async fn list_collections(&self) -> Result<Vec<String>, StoreError> {
        self.touch();
        let inner = self.inner.lock().await;
        let mut names: Vec<String> = inner
            .docs
            .iter()
            .filter(|(_, docs)| !docs.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn count(&self, collection: &str) -> Result<u64, StoreError> {
        self.touch();
        let inner = self.inner.lock().await;
        Ok(inner.docs.get(collection).map_or(0, |docs| docs.len() as u64))
    }

    async fn find_all(&self, collection: &str, order: SortOrder) -> Result<Vec<Record>, StoreError> {
        self.touch();
        let inner = self.inner.lock().await;
        let mut docs: Vec<Stored> = inner.docs.get(collection).cloned().unwrap_or_default();
        match order {
            SortOrder::Inserted => docs.sort_by_key(|d| d.seq),
            SortOrder::NewestFirst => docs.sort_by(|a, b| {
                b.record
                    .created_at
                    .cmp(&a.record.created_at)
                    .then(b.seq.cmp(&a.seq))
            }),
        }
        Ok(docs.into_iter().map(|d| d.record).collect())
    }

    async fn find_one_by(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> Result<Option<Record>, StoreError> {
        self.touch();
        let inner = self.inner.lock().await;
        Ok(inner.docs.get(collection).and_then(|docs| {
            docs.iter()
                .find(|d| d.record.get(field) == Some(value))
                .map(|d| d.record.clone())
        }))
    }

    async fn insert_one(&self, collection: &str, body: Fields) -> Result<Record, StoreError> {
        self.touch();
        self.inner.lock().await.insert(collection, body)
    }

    async fn insert_many(&self, collection: &str, bodies: Vec<Fields>) -> Result<Vec<Record>, StoreError> {
        self.touch();
        let mut inner = self.inner.lock().await;
        let mut inserted = Vec::with_capacity(bodies.len());
        for body in bodies {
            match inner.insert(collection, body) {
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
        self.touch();
        let mut inner = self.inner.lock().await;
        let found = inner
            .docs
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|d| d.record.id == id));

        Ok(found.map(|doc| {
            doc.record.fields.insert(field.to_string(), value);
            doc.record.clone()
        }))
    }

    async fn delete_all(&self, collection: &str) -> Result<u64, StoreError> {
        self.touch();
        let mut inner = self.inner.lock().await;
        Ok(inner
            .docs
            .remove(collection)
            .map_or(0, |docs| docs.len() as u64))
    }
}

/// Connector handing out one shared in-memory store.
///
/// Can be told to fail a number of attempts first, which is how the
/// retry loop is exercised without a database.
pub struct MemoryConnector {
    store: Arc<MemoryStore>,
    failures_left: AtomicU32,
    attempts: AtomicU32,
}

impl MemoryConnector {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            failures_left: AtomicU32::new(0),
            attempts: AtomicU32::new(0),
        }
    }

    /// Refuse the first `n` connection attempts.
    pub fn failing_first(self, n: u32) -> Self {
        self.failures_left.store(n, Ordering::SeqCst);
        self
    }

    /// Connection attempts seen so far.
    pub fn attempts(&self) -> u32 {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, _uri: &str, _timeout: Duration) -> Result<Arc<dyn DocumentStore>, StoreError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        let refused = self
            .failures_left
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if refused {
            return Err(StoreError::Connection("connection refused".into()));
        }
        let store: Arc<dyn DocumentStore> = self.store.clone();
        Ok(store)
    }
}
