//! Application state shared across handlers

use std::sync::Arc;

use backoffice_core::Environment;

use crate::db::{ConnectionManager, DocumentStore, RepoError};
use crate::http::error::ApiError;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    connection: Arc<ConnectionManager>,
    environment: Environment,
}

impl AppState {
    pub fn new(connection: Arc<ConnectionManager>, environment: Environment) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                connection,
                environment,
            }),
        }
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.inner.connection
    }

    pub fn environment(&self) -> Environment {
        self.inner.environment
    }

    /// The open store, or a 500 carrying `context` while disconnected.
    pub fn store(&self, context: &'static str) -> Result<Arc<dyn DocumentStore>, ApiError> {
        self.connection()
            .store()
            .map_err(|e| self.fail(context)(RepoError::from(e)))
    }

    /// Turn a repository error into the route's API error.
    pub fn fail(&self, context: &'static str) -> impl Fn(RepoError) -> ApiError + '_ {
        move |err| ApiError::from_repo(context, err, self.environment())
    }
}
