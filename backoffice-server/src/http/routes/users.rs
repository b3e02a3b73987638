//! User endpoints

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    routing::get,
    Json, Router,
};
use backoffice_core::{Record, Role, User};
use serde::{Deserialize, Serialize};

use super::salons::DeletedResponse;
use crate::db::RecordRepo;
use crate::http::error::ApiError;
use crate::http::extractors::parse_body;
use crate::state::AppState;

/// Create user request; every field falls back to a demo default
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
    pub salon_name: Option<String>,
}

/// Blank strings count as absent, like a missing field.
fn given(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl CreateUserRequest {
    pub fn into_user(self) -> User {
        User {
            username: given(self.username).unwrap_or_else(|| "testuser".to_string()),
            email: given(self.email).unwrap_or_else(|| "test@example.com".to_string()),
            password: given(self.password).unwrap_or_else(|| "password123".to_string()),
            role: given(self.role).unwrap_or_else(|| Role::Customer.as_str().to_string()),
            salon_name: given(self.salon_name),
        }
    }
}

/// Create user response
#[derive(Debug, Serialize)]
pub struct CreatedUserResponse {
    pub message: &'static str,
    pub user: Record,
}

/// GET /api/users - password excluded, seeded when empty
async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<Record>>, ApiError> {
    const CONTEXT: &str = "Error fetching users";
    let store = state.store(CONTEXT)?;

    let users = RecordRepo::<User>::new(store.as_ref())
        .list_or_seed()
        .await
        .map_err(state.fail(CONTEXT))?;

    Ok(Json(users))
}

/// POST /api/users - create one user
///
/// An empty body is allowed and creates the default test user.
async fn create_user(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<CreatedUserResponse>), ApiError> {
    const CONTEXT: &str = "Error creating user";
    let req: CreateUserRequest = parse_body(&body, CONTEXT)?;
    let store = state.store(CONTEXT)?;

    let user = RecordRepo::<User>::new(store.as_ref())
        .create(&req.into_user())
        .await
        .map_err(state.fail(CONTEXT))?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedUserResponse {
            message: "User created successfully",
            user,
        }),
    ))
}

/// DELETE /api/users - remove every user
async fn delete_users(State(state): State<AppState>) -> Result<Json<DeletedResponse>, ApiError> {
    const CONTEXT: &str = "Error deleting users";
    let store = state.store(CONTEXT)?;

    let deleted_count = RecordRepo::<User>::new(store.as_ref())
        .delete_all()
        .await
        .map_err(state.fail(CONTEXT))?;

    Ok(Json(DeletedResponse {
        message: "All users deleted successfully",
        deleted_count,
    }))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new().route("/users", get(list_users).post(create_user).delete(delete_users))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let user = CreateUserRequest::default().into_user();
        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "test@example.com");
        assert_eq!(user.role, "customer");
        assert!(user.salon_name.is_none());
    }

    #[test]
    fn given_fields_are_kept() {
        let req: CreateUserRequest =
            serde_json::from_str(r#"{"email": "ann@example.com", "salonName": "Style Hub"}"#).unwrap();
        let user = req.into_user();
        assert_eq!(user.email, "ann@example.com");
        assert_eq!(user.salon_name.as_deref(), Some("Style Hub"));
        assert_eq!(user.username, "testuser");
    }

    #[test]
    fn blank_fields_take_defaults() {
        let req: CreateUserRequest = serde_json::from_str(
            r#"{"username": "", "email": "a@b.c", "password": "  ", "role": "", "salonName": ""}"#,
        )
        .unwrap();
        let user = req.into_user();
        assert_eq!(user.username, "testuser");
        assert_eq!(user.email, "a@b.c");
        assert_eq!(user.password, "password123");
        assert_eq!(user.role, "customer");
        assert!(user.salon_name.is_none());
    }
}
