//! API error types with IntoResponse
//!
//! Workflow errors are converted to JSON responses with the matching
//! status code. Storage failures are logged server-side and returned as a
//! generic message.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::repos::DbError;
use crate::models::ValidationError;
use crate::service::TrainerError;

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Validation failed (400)
    Validation(ValidationError),

    /// Name or email already taken (400)
    Duplicate { message: String },

    /// No trainer matched (404)
    NotFound { message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(e) => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "validation_error",
                    "message": e.to_string()
                }),
            ),
            Self::Duplicate { message } => (
                StatusCode::BAD_REQUEST,
                json!({
                    "error": "duplicate",
                    "message": message
                }),
            ),
            Self::NotFound { message } => (
                StatusCode::NOT_FOUND,
                json!({
                    "error": "not_found",
                    "message": message
                }),
            ),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "internal_error",
                        "message": "an internal error occurred"
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<TrainerError> for ApiError {
    fn from(e: TrainerError) -> Self {
        match e {
            TrainerError::NotFound(message) => Self::NotFound { message },
            TrainerError::Invalid(e) => Self::Validation(e),
            TrainerError::Storage(e) => Self::Database(e),
            dup @ (TrainerError::DuplicateName | TrainerError::DuplicateEmail) => {
                Self::Duplicate {
                    message: dup.to_string(),
                }
            }
        }
    }
}
