//! API DTOs (Data Transfer Objects)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::entities::CacheStats;

/// Header telling clients whether a response came from the cache
pub const CACHE_STATUS_HEADER: &str = "x-cache";

/// GET /cache/v1/stats response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsResponse {
    pub enabled: bool,
    pub file_count: u64,
    pub total_bytes: u64,
    pub cache_dir: PathBuf,
    pub ttl_secs: u64,
}

impl From<CacheStats> for StatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            enabled: stats.enabled,
            file_count: stats.file_count,
            total_bytes: stats.total_bytes,
            cache_dir: stats.cache_dir,
            ttl_secs: stats.ttl_secs,
        }
    }
}

/// Purge and notify response
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PurgeResponse {
    pub deleted: u64,
}
