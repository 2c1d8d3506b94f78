//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use platform::rate_limit::AttemptStore;

use crate::domain::repository::UserDirectory;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::resolve_identity;

/// Mount point of the auth routes under the API prefix
pub const AUTH_NAMESPACE: &str = "/wp-json/auth/v1";

/// Create the Auth router
///
/// Routes are relative; nest it under [`AUTH_NAMESPACE`]. The identity
/// middleware must wrap it for refresh/verify/logout to see a caller.
pub fn auth_router<D, S>(state: AuthAppState<D, S>) -> Router
where
    D: UserDirectory + Send + Sync + 'static,
    S: AttemptStore + Send + Sync + 'static,
{
    Router::new()
        .route("/login", post(handlers::login::<D, S>))
        .route("/refresh", post(handlers::refresh::<D, S>))
        .route("/verify", get(handlers::verify))
        .route("/logout", post(handlers::logout))
        .with_state(state)
}

/// Wrap `router` with the identity middleware
///
/// Every route inside sees the caller's `Identity` extension when the
/// request carries a valid token.
pub fn with_identity<D, S>(router: Router, state: AuthAppState<D, S>) -> Router
where
    D: UserDirectory + Send + Sync + 'static,
    S: AttemptStore + Send + Sync + 'static,
{
    router.layer(from_fn_with_state(state, resolve_identity::<D, S>))
}
