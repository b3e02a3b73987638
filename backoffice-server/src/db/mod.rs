//! Database layer - connection lifecycle, stores and repositories
//!
//! # Design Principles
//!
//! - One `ConnectionManager` per process, passed through app state
//! - Store backends sit behind the `DocumentStore` trait
//! - Repositories borrow the store per call, no global handle
//! - No check-then-insert guards beyond the email uniqueness lookup

pub mod connection;
pub mod memory;
pub mod migrations;
pub mod postgres;
pub mod repos;
pub mod store;

pub use connection::{ConnectOptions, ConnectionManager, ConnectionState, RetryPolicy};
pub use memory::{MemoryConnector, MemoryStore};
pub use postgres::{PgConnector, PgDocumentStore};
pub use repos::{MessageRepo, RecordRepo, RepoError};
pub use store::{Connector, DocumentStore, SortOrder, StoreError};
