//! Error types for the library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::patch::{EntityKind, PatchError};

/// Application error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchEntity = 4,
    BadValue = 5,
    Duplicate = 6,
    UnsupportedRelation = 7,
    NoSuchRelatedEntity = 8,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Patch(#[from] PatchError),
}

impl AppError {
    pub fn entity_not_found(kind: EntityKind, id: i64) -> Self {
        AppError::NotFound(format!("{} not found with id: {}", kind, id))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchEntity, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => match e.as_database_error() {
                Some(db) if db.is_unique_violation() || db.is_foreign_key_violation() => {
                    tracing::warn!("Integrity violation: {}", db);
                    (
                        StatusCode::BAD_REQUEST,
                        ErrorCode::Duplicate,
                        "Duplicate or inconsistent data".to_string(),
                    )
                }
                _ => {
                    tracing::error!("Database error: {:?}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::DbFailure,
                        "Database error".to_string(),
                    )
                }
            },
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
                )
            }
            AppError::Patch(e) => match e {
                PatchError::InvalidFieldValue { .. } => {
                    (StatusCode::BAD_REQUEST, ErrorCode::BadValue, e.to_string())
                }
                PatchError::UnsupportedRelationUpdate { .. } => {
                    (StatusCode::BAD_REQUEST, ErrorCode::UnsupportedRelation, e.to_string())
                }
                PatchError::RelatedEntityNotFound { .. } => {
                    (StatusCode::BAD_REQUEST, ErrorCode::NoSuchRelatedEntity, e.to_string())
                }
                PatchError::SchemaMismatch { .. } => {
                    tracing::error!("Field registry inconsistency: {}", e);
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ErrorCode::Failure,
                        "Internal server error".to_string(),
                    )
                }
            },
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
