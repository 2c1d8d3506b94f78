//! Application Configuration
//!
//! Configuration for the response cache.

use std::path::PathBuf;
use std::time::Duration;

/// Default cache directory, relative to the working directory
pub const DEFAULT_CACHE_DIR: &str = "./cache/api-responses";

/// Largest response body buffered for storage
pub const DEFAULT_MAX_BODY_BYTES: usize = 8 * 1024 * 1024;

/// Response cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Master switch; when off nothing is read, stored, or swept
    pub enabled: bool,
    /// Freshness window of a stored entry
    pub duration: Duration,
    /// Directory holding one file per entry
    pub cache_dir: PathBuf,
    /// Only paths under this prefix are cacheable
    pub api_prefix: String,
    /// Paths under these prefixes are never cached
    pub excluded_prefixes: Vec<String>,
    /// Cookies whose name starts with this mark a logged-in browser session
    pub session_cookie_prefix: String,
    /// Period of the background full purge
    pub sweep_interval: Duration,
    /// Responses whose body may exceed this pass through unstored
    pub max_body_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration: Duration::from_secs(3600),
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            api_prefix: "/wp-json/".to_string(),
            excluded_prefixes: vec![
                "/wp-json/wp/v2/users".to_string(),
                "/wp-json/wp/v2/comments".to_string(),
                "/wp-json/auth/v1".to_string(),
                "/wp-json/cache/v1".to_string(),
            ],
            session_cookie_prefix: "wordpress_logged_in_".to_string(),
            sweep_interval: Duration::from_secs(86_400),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl CacheConfig {
    /// Default configuration rooted at `cache_dir`
    pub fn in_dir(cache_dir: impl Into<PathBuf>) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            ..Default::default()
        }
    }

    pub fn duration_secs(&self) -> i64 {
        i64::try_from(self.duration.as_secs()).unwrap_or(i64::MAX)
    }
}
