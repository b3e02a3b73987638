//! Salon owner endpoints

use axum::{extract::State, routing::get, Json, Router};
use backoffice_core::{Record, SalonOwner};

use crate::db::RecordRepo;
use crate::http::error::ApiError;
use crate::state::AppState;

/// GET /api/salon-owners - password excluded, seeded when empty
async fn list_salon_owners(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    const CONTEXT: &str = "Error fetching salon owners";
    let store = state.store(CONTEXT)?;

    let owners = RecordRepo::<SalonOwner>::new(store.as_ref())
        .list_or_seed()
        .await
        .map_err(state.fail(CONTEXT))?;

    Ok(Json(owners))
}

/// Salon owner routes
pub fn router() -> Router<AppState> {
    Router::new().route("/salon-owners", get(list_salon_owners))
}
