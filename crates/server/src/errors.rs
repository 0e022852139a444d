use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use service::auth::errors::AuthError;
use service::errors::ServiceError;
use service::storage::StorageError;

/// HTTP-boundary error. Every component failure is translated to exactly
/// one of these; no partial responses follow a failure.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

fn detail_allowed() -> bool {
    // Generic 500 bodies in production; detail elsewhere.
    std::env::var("APP_ENV").map(|e| e != "production").unwrap_or(true)
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, Json(serde_json::json!({"error": msg}))).into_response()
            }
            ApiError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, Json(serde_json::json!({"error": msg}))).into_response()
            }
            ApiError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, Json(serde_json::json!({"error": msg}))).into_response()
            }
            ApiError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, Json(serde_json::json!({"error": msg}))).into_response()
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "internal error");
                let body = if detail_allowed() {
                    serde_json::json!({"error": "Server error", "details": msg})
                } else {
                    serde_json::json!({"error": "Server error"})
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
            }
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => ApiError::BadRequest(msg),
            ServiceError::NotFound(msg) => ApiError::NotFound(msg),
            ServiceError::Db(msg) => ApiError::Internal(msg),
            ServiceError::Storage(msg) => ApiError::Internal(msg),
            ServiceError::Model(m) => match m {
                models::errors::ModelError::Validation(msg) => ApiError::BadRequest(msg),
                models::errors::ModelError::Db(msg) => ApiError::Internal(msg),
            },
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::Validation(msg) => ApiError::BadRequest(msg),
            AuthError::Conflict => ApiError::BadRequest("User already exists".into()),
            AuthError::NotFound => ApiError::NotFound("user not found".into()),
            AuthError::Unauthorized => ApiError::Unauthorized("Invalid email or password".into()),
            AuthError::HashError(msg)
            | AuthError::TokenError(msg)
            | AuthError::Repository(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        ApiError::Internal(e.to_string())
    }
}
