//! Application Layer
//!
//! Cache configuration, the response cache use case, and the sweeper.

pub mod config;
pub mod response_cache;
pub mod sweep;

pub use config::CacheConfig;
pub use response_cache::ResponseCache;
pub use sweep::spawn_sweeper;
