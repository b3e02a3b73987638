//! Salon profile endpoints

use axum::{extract::State, routing::get, Json, Router};
use backoffice_core::{Record, SalonProfile};
use serde::Serialize;

use crate::db::RecordRepo;
use crate::http::error::ApiError;
use crate::state::AppState;

/// Delete-all response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedResponse {
    pub message: &'static str,
    pub deleted_count: u64,
}

/// GET /api/salons - seeded when empty
async fn list_salons(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    const CONTEXT: &str = "Error fetching salons";
    let store = state.store(CONTEXT)?;

    let salons = RecordRepo::<SalonProfile>::new(store.as_ref())
        .list_or_seed()
        .await
        .map_err(state.fail(CONTEXT))?;

    Ok(Json(salons))
}

/// DELETE /api/salons - remove every salon profile
async fn delete_salons(State(state): State<AppState>) -> Result<Json<DeletedResponse>, ApiError> {
    const CONTEXT: &str = "Error deleting salons";
    let store = state.store(CONTEXT)?;

    let deleted_count = RecordRepo::<SalonProfile>::new(store.as_ref())
        .delete_all()
        .await
        .map_err(state.fail(CONTEXT))?;

    Ok(Json(DeletedResponse {
        message: "All salons deleted successfully",
        deleted_count,
    }))
}

/// Salon routes
pub fn router() -> Router<AppState> {
    Router::new().route("/salons", get(list_salons).delete(delete_salons))
}
