//! LMS Error Types
//!
//! This module provides LMS-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// LMS-specific result type alias
pub type LmsResult<T> = Result<T, LmsError>;

/// LMS-specific error variants
#[derive(Debug, Error)]
pub enum LmsError {
    /// Course not found, or the caller is not enrolled
    ///
    /// Enrollment failures deliberately collapse into this variant so
    /// course existence is not disclosed to non-enrolled users.
    #[error("Course not found")]
    CourseNotFound,

    /// Lesson not found
    #[error("Lesson not found")]
    LessonNotFound,

    /// Category not found
    #[error("Category not found")]
    CategoryNotFound,

    /// Certificate not found or owned by someone else
    #[error("Certificate not found")]
    CertificateNotFound,

    /// Input failed validation
    #[error("Invalid data")]
    InvalidData(String),

    /// Fixed-window rate limit exceeded
    #[error("Too many requests")]
    RateLimited { retry_after_ms: i64 },

    /// Client looks automated
    #[error("Request blocked")]
    BlockedAsBot,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl LmsError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            LmsError::CourseNotFound
            | LmsError::LessonNotFound
            | LmsError::CategoryNotFound
            | LmsError::CertificateNotFound => StatusCode::NOT_FOUND,
            LmsError::InvalidData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            LmsError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            LmsError::BlockedAsBot => StatusCode::FORBIDDEN,
            LmsError::Database(_) | LmsError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            LmsError::CourseNotFound
            | LmsError::LessonNotFound
            | LmsError::CategoryNotFound
            | LmsError::CertificateNotFound => ErrorKind::NotFound,
            LmsError::InvalidData(_) => ErrorKind::UnprocessableEntity,
            LmsError::RateLimited { .. } => ErrorKind::TooManyRequests,
            LmsError::BlockedAsBot => ErrorKind::Forbidden,
            LmsError::Database(_) | LmsError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            LmsError::Database(e) => {
                tracing::error!(error = %e, "LMS database error");
            }
            LmsError::Internal(msg) => {
                tracing::error!(message = %msg, "LMS internal error");
            }
            LmsError::RateLimited { retry_after_ms } => {
                tracing::warn!(retry_after_ms = retry_after_ms, "Mutation rate limited");
            }
            LmsError::BlockedAsBot => {
                tracing::warn!("Automated client blocked");
            }
            LmsError::InvalidData(detail) => {
                tracing::debug!(detail = %detail, "Validation failed");
            }
            _ => {
                tracing::debug!(error = %self, "LMS error");
            }
        }
    }
}

impl IntoResponse for LmsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
