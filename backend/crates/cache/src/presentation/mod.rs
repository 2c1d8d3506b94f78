//! Presentation Layer
//!
//! HTTP handlers, DTOs, middleware, and router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::CacheState;
pub use middleware::cache_responses;
pub use router::{CACHE_NAMESPACE, cache_router, with_cache};
