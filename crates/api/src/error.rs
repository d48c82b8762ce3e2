//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. All route handlers return `Result<T, AppError>`.
//! Error bodies are JSON: `{"message": "...", "requestId": "..."}`.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use blog_core::PostError;

use crate::db::RepositoryError;
use crate::middleware::RequestId;

/// Application-level error type for the blog API.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(RepositoryError),

    /// Request body failed domain validation.
    #[error("Invalid post: {0}")]
    Validation(#[from] PostError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound("post".to_owned()),
            other => Self::Database(other),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if matches!(self, Self::Database(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Database(_) => "Internal server error".to_string(),
            Self::Validation(err) => err.to_string(),
            Self::BadRequest(msg) => msg.clone(),
            Self::NotFound(_) => self.to_string(),
        };

        error_response(status, &message)
    }
}

/// JSON error body tagged with the current request id, when there is one.
pub fn error_response(status: StatusCode, message: &str) -> Response {
    let body = match RequestId::current() {
        Some(id) => json!({ "message": message, "requestId": id.as_str() }),
        None => json!({ "message": message }),
    };
    (status, Json(body)).into_response()
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
