//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::rate_limit::AttemptStoreError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Message shared by every token rejection
pub const INVALID_TOKEN_MESSAGE: &str = "Invalid or expired token";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Malformed, expired, or wrongly signed token
    #[error("Invalid or expired token")]
    InvalidToken,

    /// No usable credentials on the request, or the token subject is gone
    #[error("Invalid or expired token")]
    Unauthenticated,

    /// Client is locked out after repeated login failures
    #[error(
        "Too many login attempts. Please try again in {} minute(s).",
        retry_minutes(.retry_after_secs)
    )]
    TooManyAttempts { retry_after_secs: u64 },

    /// Authenticated, but without the role the route requires
    #[error("Insufficient permissions")]
    Forbidden,

    /// Invalid credentials (unknown user or wrong password)
    #[error("Invalid username or password")]
    InvalidCredentials,

    /// Attempt counter store failure
    #[error("Attempt store error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Remaining lockout in whole minutes, rounded up
fn retry_minutes(secs: &u64) -> u64 {
    secs.div_ceil(60).max(1)
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::InvalidToken | AuthError::Unauthenticated | AuthError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::TooManyAttempts { .. } => StatusCode::TOO_MANY_REQUESTS,
            AuthError::Storage(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidToken | AuthError::Unauthenticated | AuthError::InvalidCredentials => {
                ErrorKind::Unauthorized
            }
            AuthError::Forbidden => ErrorKind::Forbidden,
            AuthError::TooManyAttempts { .. } => ErrorKind::TooManyRequests,
            AuthError::Storage(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Machine-readable code sent to clients
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::InvalidToken | AuthError::Unauthenticated => "invalid_token",
            AuthError::Forbidden => "forbidden",
            AuthError::TooManyAttempts { .. } => "too_many_attempts",
            AuthError::InvalidCredentials => "invalid_credentials",
            AuthError::Storage(_) | AuthError::Internal(_) => "internal_error",
        }
    }

    /// Convert to AppError
    ///
    /// Internal details never reach the response body.
    pub fn to_app_error(&self) -> AppError {
        let err = match self {
            AuthError::Storage(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
        .with_code(self.code());

        match self {
            AuthError::TooManyAttempts { retry_after_secs } => {
                err.with_retry_after(*retry_after_secs)
            }
            _ => err,
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Storage(msg) => {
                tracing::error!(message = %msg, "Auth attempt store error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::Forbidden => {
                tracing::warn!("Request rejected for missing role");
            }
            AuthError::TooManyAttempts { retry_after_secs } => {
                tracing::warn!(retry_after_secs, "Login attempt while locked out");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<AttemptStoreError> for AuthError {
    fn from(err: AttemptStoreError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_errors_are_indistinguishable() {
        let a = AuthError::InvalidToken.to_app_error();
        let b = AuthError::Unauthenticated.to_app_error();

        assert_eq!(a.code(), "invalid_token");
        assert_eq!(a.code(), b.code());
        assert_eq!(a.message(), INVALID_TOKEN_MESSAGE);
        assert_eq!(a.message(), b.message());
        assert_eq!(a.status_code(), 401);
    }

    #[test]
    fn test_too_many_attempts_rounds_minutes_up() {
        let err = AuthError::TooManyAttempts {
            retry_after_secs: 61,
        };
        assert!(err.to_string().contains("2 minute(s)"));
        assert_eq!(err.status_code(), StatusCode::TOO_MANY_REQUESTS);

        let app = err.to_app_error();
        assert_eq!(app.code(), "too_many_attempts");
        assert_eq!(app.retry_after(), Some(61));
    }

    #[test]
    fn test_too_many_attempts_never_says_zero_minutes() {
        let err = AuthError::TooManyAttempts { retry_after_secs: 0 };
        assert!(err.to_string().contains("1 minute(s)"));
    }

    #[test]
    fn test_storage_error_is_not_leaked() {
        let app = AuthError::Storage("disk on fire".to_string()).to_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("disk"));
    }

    #[test]
    fn test_forbidden() {
        let app = AuthError::Forbidden.to_app_error();
        assert_eq!(app.status_code(), 403);
        assert_eq!(app.code(), "forbidden");
    }

    #[test]
    fn test_invalid_credentials() {
        let app = AuthError::InvalidCredentials.to_app_error();
        assert_eq!(app.code(), "invalid_credentials");
        assert_eq!(app.message(), "Invalid username or password");
    }
}
