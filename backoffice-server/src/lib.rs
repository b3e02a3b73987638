//! backoffice-server: HTTP API for the salon back office
//!
//! Serves users, salon owners, salon profiles and contact messages from a
//! document store that is connected in the background and retried until
//! it answers. Empty collections are seeded with demo data on first read.

pub mod db;
pub mod http;
pub mod state;

pub use db::{
    ConnectOptions, ConnectionManager, ConnectionState, MemoryConnector, MemoryStore, PgConnector,
    RetryPolicy,
};
pub use http::{build_router, run_server, ServerConfig, ServerError};
pub use state::AppState;
