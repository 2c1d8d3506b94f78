//! Cache Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::domain::repository::CacheStore;
use crate::presentation::handlers::{self, CacheState};
use crate::presentation::middleware::cache_responses;

/// Mount point of the cache admin routes under the API prefix
pub const CACHE_NAMESPACE: &str = "/wp-json/cache/v1";

/// Create the cache admin router
///
/// Routes are relative; nest it under [`CACHE_NAMESPACE`] behind an
/// authentication guard.
pub fn cache_router<S>(cache: CacheState<S>) -> Router
where
    S: CacheStore + Send + Sync + 'static,
{
    Router::new()
        .route("/stats", get(handlers::stats::<S>))
        .route("/purge", post(handlers::purge::<S>))
        .route("/notify", post(handlers::notify::<S>))
        .with_state(cache)
}

/// Wrap `router` with the response cache middleware
pub fn with_cache<S>(router: Router, cache: CacheState<S>) -> Router
where
    S: CacheStore + Send + Sync + 'static,
{
    router.layer(from_fn_with_state(cache, cache_responses::<S>))
}
