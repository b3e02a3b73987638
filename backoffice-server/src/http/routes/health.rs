//! Health check endpoint

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Connection state of the document store
    pub database: &'static str,
}

/// GET /health
///
/// Answers even while the store is still connecting.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "Server is running",
        version: env!("CARGO_PKG_VERSION"),
        database: state.connection().state().label(),
    })
}

/// Health routes
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::ConnectionManager;
    use backoffice_core::Environment;
    use std::sync::Arc;

    #[tokio::test]
    async fn health_reports_disconnected_store() {
        let state = AppState::new(Arc::new(ConnectionManager::new()), Environment::Test);
        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "Server is running");
        assert_eq!(body.database, "disconnected");
    }
}
