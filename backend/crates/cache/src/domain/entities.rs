//! Domain Entities

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Stored API response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub body: Value,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    /// Unix seconds when the entry was written
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(body: Value, headers: BTreeMap<String, String>, timestamp: i64) -> Self {
        Self {
            body,
            headers,
            timestamp,
        }
    }

    /// Fresh while no more than `ttl_secs` have passed since it was written
    pub fn is_fresh(&self, now: i64, ttl_secs: i64) -> bool {
        now.saturating_sub(self.timestamp) <= ttl_secs
    }
}

/// Snapshot of the cache directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    pub file_count: u64,
    pub total_bytes: u64,
    pub cache_dir: PathBuf,
    pub enabled: bool,
    pub ttl_secs: u64,
}
