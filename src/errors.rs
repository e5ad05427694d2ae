//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic conversion into the API's JSON error envelope:
//! `{"error": {"message": ..., "status": ...}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use once_cell::sync::OnceCell;
use serde::Serialize;
use thiserror::Error;

/// Process-wide debug flag. When set, error envelopes carry the
/// failure kind and full message in addition to the public fields.
static DEBUG_ERRORS: OnceCell<bool> = OnceCell::new();

/// Enable or disable diagnostic fields on error envelopes.
///
/// Called once at startup from the loaded configuration; later calls
/// are ignored.
pub fn set_debug(debug: bool) {
    let _ = DEBUG_ERRORS.set(debug);
}

fn debug_enabled() -> bool {
    DEBUG_ERRORS.get().copied().unwrap_or(false)
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Authentication & Authorization
    #[error("Authentication required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Invalid credentials")]
    InvalidCredentials,

    // Resource errors
    #[error("Not Found")]
    NotFound,

    /// Login or phone collision at the storage boundary
    #[error("Unique constraint violation.")]
    UniqueViolation,

    // Validation
    #[error("{0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    BadRequest(String),

    // External service errors
    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),

    #[error("Authentication error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    // Internal
    #[error("{0}")]
    Internal(String),
}

/// Unique-index violations are a distinguishable conflict, everything
/// else from the storage boundary stays an unclassified database error.
impl From<sea_orm::DbErr> for AppError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => AppError::UniqueViolation,
            _ => AppError::Database(err),
        }
    }
}

/// Error response envelope
#[derive(Debug, Serialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    status: u16,
    /// Failure kind name, debug mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    exception: Option<String>,
    /// Full message, debug mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl AppError {
    /// Failure kind name, exposed in debug envelopes
    fn kind(&self) -> &'static str {
        match self {
            AppError::Unauthorized => "Unauthorized",
            AppError::Forbidden => "Forbidden",
            AppError::InvalidCredentials => "InvalidCredentials",
            AppError::NotFound => "NotFound",
            AppError::UniqueViolation => "UniqueViolation",
            AppError::Validation(_) => "Validation",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Database(_) => "Database",
            AppError::Jwt(_) => "Jwt",
            AppError::Internal(_) => "Internal",
        }
    }

    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Unauthorized | AppError::InvalidCredentials | AppError::Jwt(_) => {
                StatusCode::UNAUTHORIZED
            }
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UniqueViolation => StatusCode::CONFLICT,
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get user-facing message (hides internal details)
    fn user_message(&self) -> String {
        match self {
            // Unclassified failures collapse to a generic message
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                "Internal Server Error".to_string()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "Internal Server Error".to_string()
            }
            AppError::Jwt(e) => {
                tracing::debug!("JWT error: {:?}", e);
                "Invalid or expired token".to_string()
            }

            // Classified failures carry their own message
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (exception, detail) = if debug_enabled() {
            (Some(self.kind().to_string()), Some(self.to_string()))
        } else {
            (None, None)
        };

        let body = ErrorEnvelope {
            error: ErrorBody {
                message: self.user_message(),
                status: status.as_u16(),
                exception,
                detail,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Extension trait for Option -> AppError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> AppResult<T> {
        self.ok_or(AppError::NotFound)
    }
}

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
