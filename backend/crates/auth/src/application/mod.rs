//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod login;
pub mod login_throttle;
pub mod refresh;
pub mod token_service;

// Re-exports
pub use authenticate::{AuthenticateUseCase, RequestCredentials};
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use login_throttle::{LoginThrottle, ThrottleDecision};
pub use refresh::RefreshTokenUseCase;
pub use token_service::{IssuedToken, TokenService, ValidatedToken};
