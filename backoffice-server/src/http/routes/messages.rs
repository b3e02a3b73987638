//! Contact message endpoints

use axum::{
    body::Bytes,
    extract::{Path, State},
    routing::{get, patch},
    Json, Router,
};
use backoffice_core::Record;
use serde::Deserialize;

use crate::db::MessageRepo;
use crate::http::error::ApiError;
use crate::http::extractors::parse_body;
use crate::state::AppState;

/// Status update request
#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

/// GET /api/messages - newest first, seeded when empty
async fn list_messages(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    const CONTEXT: &str = "Error fetching messages";
    let store = state.store(CONTEXT)?;

    let messages = MessageRepo::new(store.as_ref())
        .list_or_seed()
        .await
        .map_err(state.fail(CONTEXT))?;

    Ok(Json(messages))
}

/// PATCH /api/messages/{id}/status - set a message's status
///
/// The body is decoded by hand so malformed JSON gets a JSON 400.
async fn update_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Record>, ApiError> {
    const CONTEXT: &str = "Error updating message status";
    let req: UpdateStatusRequest = parse_body(&body, CONTEXT)?;
    let status = req
        .status
        .ok_or_else(|| ApiError::bad_request(CONTEXT, "status is required"))?;
    let store = state.store(CONTEXT)?;

    let message = MessageRepo::new(store.as_ref())
        .update_status(&id, &status)
        .await
        .map_err(state.fail(CONTEXT))?;

    Ok(Json(message))
}

/// Message routes
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/messages", get(list_messages))
        .route("/messages/{id}/status", patch(update_status))
}
