//! Contact message status updates

use backoffice_core::{ContactMessage, Entity, Record};
use serde_json::Value;

use super::{RecordRepo, RepoError};
use crate::db::store::DocumentStore;

/// Message repository
///
/// Reads go through the generic `RecordRepo`; this adds the one
/// mutation messages support.
pub struct MessageRepo<'a> {
    store: &'a dyn DocumentStore,
}

impl<'a> MessageRepo<'a> {
    pub fn new(store: &'a dyn DocumentStore) -> Self {
        Self { store }
    }

    /// Newest first, seeding an empty collection.
    pub async fn list_or_seed(&self) -> Result<Vec<Record>, RepoError> {
        RecordRepo::<ContactMessage>::new(self.store).list_or_seed().await
    }

    /// Set `status` on one message.
    ///
    /// Any string is accepted. Single-document write, last writer wins.
    pub async fn update_status(&self, id: &str, status: &str) -> Result<Record, RepoError> {
        let updated = self
            .store
            .set_field(
                ContactMessage::KIND.collection(),
                id,
                "status",
                Value::String(status.to_string()),
            )
            .await?;

        match updated {
            Some(record) => {
                tracing::info!(id, status, "Updated message status");
                Ok(record)
            }
            None => Err(RepoError::NotFound {
                resource: ContactMessage::KIND.label(),
                id: id.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::MemoryStore;

    #[tokio::test]
    async fn marks_unread_message_read() {
        let store = MemoryStore::new();
        let repo = MessageRepo::new(&store);
        let messages = repo.list_or_seed().await.unwrap();
        let unread = messages
            .iter()
            .find(|m| m.get_str("status") == Some("unread"))
            .unwrap()
            .clone();

        let updated = repo.update_status(&unread.id, "read").await.unwrap();

        assert_eq!(updated.get_str("status"), Some("read"));
        assert_eq!(updated.id, unread.id);
        assert_eq!(updated.created_at, unread.created_at);
        let mut expected = unread.fields.clone();
        expected.insert("status".into(), Value::String("read".into()));
        assert_eq!(updated.fields, expected);
    }

    #[tokio::test]
    async fn read_back_to_unread_is_allowed() {
        let store = MemoryStore::new();
        let repo = MessageRepo::new(&store);
        let messages = repo.list_or_seed().await.unwrap();
        let read = messages
            .iter()
            .find(|m| m.get_str("status") == Some("read"))
            .unwrap();

        let updated = repo.update_status(&read.id, "unread").await.unwrap();
        assert_eq!(updated.get_str("status"), Some("unread"));
    }

    #[tokio::test]
    async fn arbitrary_status_is_stored() {
        let store = MemoryStore::new();
        let repo = MessageRepo::new(&store);
        let id = repo.list_or_seed().await.unwrap()[0].id.clone();

        let updated = repo.update_status(&id, "archived").await.unwrap();
        assert_eq!(updated.get_str("status"), Some("archived"));
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let store = MemoryStore::new();
        let repo = MessageRepo::new(&store);
        repo.list_or_seed().await.unwrap();

        let err = repo.update_status("missing", "read").await.unwrap_err();
        assert!(matches!(err, RepoError::NotFound { resource: "message", .. }));
    }

    #[tokio::test]
    async fn update_persists() {
        let store = MemoryStore::new();
        let repo = MessageRepo::new(&store);
        let id = repo.list_or_seed().await.unwrap()[0].id.clone();
        repo.update_status(&id, "read").await.unwrap();

        let again = repo.list_or_seed().await.unwrap();
        let record = again.iter().find(|m| m.id == id).unwrap();
        assert_eq!(record.get_str("status"), Some("read"));
    }
}
