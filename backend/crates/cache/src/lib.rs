//! Response Cache Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entries, keys, content changes, cacheability rules
//! - `application/` - Config, the response cache use case, periodic sweep
//! - `infra/` - File-backed entry store
//! - `presentation/` - Cache middleware, admin handlers, router
//!
//! ## Behaviour
//! - Anonymous `GET` requests under the API prefix are served from disk
//!   while fresh
//! - Requests carrying a bearer token, a `token` query parameter, or a
//!   logged-in session cookie always reach the handler
//! - Published content changes flush the whole cache

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::{CacheConfig, ResponseCache, spawn_sweeper};
pub use domain::value_objects::{CacheKey, ContentChange};
pub use error::{CacheError, CacheResult};
pub use infra::file::FileCacheStore;
pub use presentation::router::{CACHE_NAMESPACE, cache_router, with_cache};

pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entities::*;
    pub use crate::domain::value_objects::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod store {
    pub use crate::infra::file::FileCacheStore as CacheFileStore;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
