// Error handling types for the web application

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;
use tracing::error;

use crate::sessions::SessionError;

/// Errors surfaced by the persistence layer
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("no matching record found")]
    NoRecord,

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("duplicate email")]
    DuplicateEmail,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Password hashing task failed: {0}")]
    Hashing(#[from] tokio::task::JoinError),
}

/// Handler-facing error type
///
/// Client errors render a bare status text. Everything else is logged and
/// rendered as a generic 500 so internals never reach the browser.
#[derive(Debug)]
pub enum AppError {
    BadRequest,
    NotFound,
    InternalServer(String),
    ModelError(ModelError),
    SessionError(SessionError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::BadRequest => write!(f, "Bad Request"),
            AppError::NotFound => write!(f, "Not Found"),
            AppError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::ModelError(e) => write!(f, "Model Error: {}", e),
            AppError::SessionError(e) => write!(f, "Session Error: {}", e),
        }
    }
}

impl From<ModelError> for AppError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::NoRecord => AppError::NotFound,
            other => AppError::ModelError(other),
        }
    }
}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::SessionError(e)
    }
}

fn status_text(status: StatusCode) -> (StatusCode, String) {
    (
        status,
        status.canonical_reason().unwrap_or("Unknown").to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest => status_text(StatusCode::BAD_REQUEST).into_response(),
            AppError::NotFound => status_text(StatusCode::NOT_FOUND).into_response(),
            AppError::InternalServer(msg) => {
                error!(error = %msg, "Internal server error");
                status_text(StatusCode::INTERNAL_SERVER_ERROR).into_response()
            }
            AppError::ModelError(e) => {
                error!(error = %e, "Database operation failed");
                status_text(StatusCode::INTERNAL_SERVER_ERROR).into_response()
            }
            AppError::SessionError(e) => {
                error!(error = %e, "Session operation failed");
                status_text(StatusCode::INTERNAL_SERVER_ERROR).into_response()
            }
        }
    }
}
