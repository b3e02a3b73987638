//! Route handlers organized by resource

pub mod health;
pub mod messages;
pub mod salon_owners;
pub mod salons;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Resource routes, mounted under `/api`
pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(users::router())
        .merge(salon_owners::router())
        .merge(salons::router())
        .merge(messages::router())
}
