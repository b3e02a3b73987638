//! API error types with IntoResponse
//!
//! Every failure is a JSON body with a human-readable `message`. Store
//! failures add the underlying `error` string, and outside production a
//! `details` field with the full error chain.

use std::error::Error as _;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use backoffice_core::Environment;
use serde_json::json;

use crate::db::RepoError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Invalid input or duplicate entity (400)
    BadRequest {
        message: String,
        error: Option<String>,
    },

    /// Resource not found (404)
    NotFound { message: String },

    /// Store failure (500, logged)
    Internal {
        message: &'static str,
        error: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
            error: Some(error.into()),
        }
    }

    /// Map a repository error, `context` naming the failed operation.
    pub fn from_repo(context: &'static str, err: RepoError, environment: Environment) -> Self {
        match err {
            RepoError::NotFound { resource, .. } => Self::NotFound {
                message: format!("{} not found", capitalize(resource)),
            },
            RepoError::Duplicate { resource, .. } => Self::BadRequest {
                message: format!("{} already exists", capitalize(resource)),
                error: None,
            },
            RepoError::Validation { .. } => Self::BadRequest {
                message: context.to_string(),
                error: Some(err.to_string()),
            },
            RepoError::Store(_) => {
                let details = (!environment.is_production()).then(|| error_chain(&err));
                Self::Internal {
                    message: context,
                    error: err.to_string(),
                    details,
                }
            }
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest { message, error } => match error {
                Some(error) => json!({ "message": message, "error": error }),
                None => json!({ "message": message }),
            },
            Self::NotFound { message } => json!({ "message": message }),
            Self::Internal {
                message,
                error,
                details,
            } => {
                tracing::error!(error = %error, "{}", message);
                match details {
                    Some(details) => json!({ "message": message, "error": error, "details": details }),
                    None => json!({ "message": message, "error": error }),
                }
            }
        };

        (status, Json(body)).into_response()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn error_chain(err: &RepoError) -> String {
    let mut parts = vec![format!("{:?}", err)];
    let mut source = err.source();
    while let Some(cause) = source {
        parts.push(cause.to_string());
        source = cause.source();
    }
    parts.join("\ncaused by: ")
}
