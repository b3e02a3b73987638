//! Repository implementations for document access
//!
//! Each repository borrows the store for the duration of a call:
//! - reads backfill an empty collection with the kind's seed set first
//! - sensitive fields are stripped before anything leaves the repository
//! - no transactions; the store serializes conflicting writes

pub mod messages;
pub mod records;

pub use messages::MessageRepo;
pub use records::RecordRepo;

use backoffice_core::ValidationError;

use super::store::StoreError;

/// Repository error type
#[derive(Debug, thiserror::Error)]
pub enum RepoError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("{resource} already exists: {field} '{value}'")]
    Duplicate {
        resource: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("invalid {resource}: {source}")]
    Validation {
        resource: &'static str,
        source: ValidationError,
    },
}

impl RepoError {
    /// True when the store had no open connection.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Store(StoreError::Unavailable))
    }
}
