//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Token format, identity, user directory trait
//! - `application/` - Token service, login throttle, use cases
//! - `infra/` - In-memory user directory
//! - `presentation/` - HTTP handlers, DTOs, extractors, middleware, router
//!
//! ## Features
//! - Login with username (or email) + password, returning a bearer token
//! - Token refresh, verification, and acknowledgement-only logout
//! - Bearer token resolution from header, `token` query, or `token` body field
//!
//! ## Security Model
//! - Tokens are HMAC-SHA256 signed, compared in constant time, never stored
//! - Every token failure surfaces as the same 401 body
//! - Per-IP lockout after repeated login failures
//! - Passwords verified against Argon2id hashes

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::{LoginThrottle, RequestCredentials, TokenService};
pub use domain::{Identity, UserDirectory, UserId};
pub use error::{AuthError, AuthResult};
pub use infra::memory::InMemoryUserDirectory;
pub use presentation::router::{AUTH_NAMESPACE, auth_router, with_identity};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::token::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::memory::InMemoryUserDirectory as UserStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}

#[cfg(test)]
mod tests;
