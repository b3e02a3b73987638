//! Generic record repository - read-or-seed, create, delete-all
//!
//! Works for every kind through the `Entity` trait:
//! - `ensure_seeded`: backfill an empty collection with the seed set
//! - `list_or_seed`: `ensure_seeded`, then read everything
//! - `create_one`: schema check, uniqueness check, insert
//! - `delete_all`: unconditional wipe
//!
//! There is no persisted "seeded" marker. Two reads racing on an empty
//! collection can both insert the seed set.

use std::marker::PhantomData;

use backoffice_core::{Entity, Fields, Record};

use super::RepoError;
use crate::db::store::{DocumentStore, SortOrder};

/// Repository for records of kind `E`
pub struct RecordRepo<'a, E: Entity> {
    store: &'a dyn DocumentStore,
    _kind: PhantomData<E>,
}

impl<'a, E: Entity> RecordRepo<'a, E> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self {
            store,
            _kind: PhantomData,
        }
    }

    fn collection(&self) -> &'static str {
        E::KIND.collection()
    }

    fn order(&self) -> SortOrder {
        if E::KIND.newest_first() {
            SortOrder::NewestFirst
        } else {
            SortOrder::Inserted
        }
    }

    fn project(record: Record) -> Record {
        record.without(E::SENSITIVE_FIELDS)
    }

    /// Insert the seed set if the collection is empty.
    ///
    /// Returns whether seeding happened. A failure part way leaves the
    /// already inserted seeds in place.
    pub async fn ensure_seeded(&self) -> Result<bool, RepoError> {
        if self.store.count(self.collection()).await? > 0 {
            return Ok(false);
        }

        let bodies = E::seed_set()
            .iter()
            .map(Entity::to_fields)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|source| RepoError::Validation {
                resource: E::KIND.label(),
                source,
            })?;

        let inserted = self.store.insert_many(self.collection(), bodies).await?;
        tracing::info!(
            collection = self.collection(),
            count = inserted.len(),
            "Seeded empty collection"
        );
        Ok(true)
    }

    /// All records, without sensitive fields. Does not seed.
    pub async fn list(&self) -> Result<Vec<Record>, RepoError> {
        let records = self.store.find_all(self.collection(), self.order()).await?;
        Ok(records.into_iter().map(Self::project).collect())
    }

    /// All records, seeding the collection first if it is empty.
    pub async fn list_or_seed(&self) -> Result<Vec<Record>, RepoError> {
        self.ensure_seeded().await?;
        let records = self.list().await?;
        tracing::debug!(collection = self.collection(), count = records.len(), "Listed records");
        Ok(records)
    }

    /// Validate and insert one record from raw fields.
    pub async fn create_one(&self, fields: Fields) -> Result<Record, RepoError> {
        let entity = E::from_fields(fields).map_err(|source| RepoError::Validation {
            resource: E::KIND.label(),
            source,
        })?;
        self.create(&entity).await
    }

    /// Insert an already typed record after the uniqueness checks.
    pub async fn create(&self, entity: &E) -> Result<Record, RepoError> {
        entity.validate().map_err(|source| RepoError::Validation {
            resource: E::KIND.label(),
            source,
        })?;
        let body = entity.to_fields().map_err(|source| RepoError::Validation {
            resource: E::KIND.label(),
            source,
        })?;

        for &field in E::UNIQUE_FIELDS {
            let Some(value) = body.get(field) else {
                continue;
            };
            if self
                .store
                .find_one_by(self.collection(), field, value)
                .await?
                .is_some()
            {
                return Err(RepoError::Duplicate {
                    resource: E::KIND.label(),
                    field,
                    value: value.as_str().map_or_else(|| value.to_string(), str::to_string),
                });
            }
        }

        let record = self.store.insert_one(self.collection(), body).await?;
        tracing::info!(collection = self.collection(), id = %record.id, "Created record");
        Ok(Self::project(record))
    }

    /// Remove every record of the kind, returning how many went.
    pub async fn delete_all(&self) -> Result<u64, RepoError> {
        let removed = self.store.delete_all(self.collection()).await?;
        tracing::warn!(collection = self.collection(), removed, "Deleted all records");
        Ok(removed)
    }
}
