//! Cache Error Types
//!
//! Cache failures never reach API clients on the read path: the middleware
//! treats them as misses. They only surface from the admin handlers.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Cache-specific result type alias
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache-specific error variants
#[derive(Debug, Error)]
pub enum CacheError {
    /// Reading or writing the cache directory failed
    #[error("Cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Entry could not be encoded or decoded
    #[error("Cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Caching is turned off by configuration
    #[error("Response caching is disabled")]
    Disabled,
}

impl CacheError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            CacheError::Io(_) | CacheError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::Disabled => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CacheError::Io(_) | CacheError::Serialization(_) => ErrorKind::InternalServerError,
            CacheError::Disabled => ErrorKind::ServiceUnavailable,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            CacheError::Io(_) | CacheError::Serialization(_) => "cache_error",
            CacheError::Disabled => "cache_disabled",
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            CacheError::Io(_) | CacheError::Serialization(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            CacheError::Disabled => AppError::new(self.kind(), self.to_string()),
        }
        .with_code(self.code())
    }

    fn log(&self) {
        match self {
            CacheError::Io(e) => tracing::error!(error = %e, "Cache I/O error"),
            CacheError::Serialization(e) => {
                tracing::error!(error = %e, "Cache serialization error")
            }
            CacheError::Disabled => tracing::debug!("Cache request while disabled"),
        }
    }
}

impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
