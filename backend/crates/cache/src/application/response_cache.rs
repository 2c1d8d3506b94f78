//! Response Cache Use Case
//!
//! Freshness, key derivation and invalidation on top of a [`CacheStore`].

use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;

use platform::clock::SharedClock;

use crate::application::config::CacheConfig;
use crate::domain::entities::{CacheEntry, CacheStats};
use crate::domain::repository::CacheStore;
use crate::domain::services::{self, RequestContext};
use crate::domain::value_objects::{CacheKey, ContentChange};
use crate::error::{CacheError, CacheResult};

/// TTL-bounded cache of anonymous API responses
pub struct ResponseCache<S>
where
    S: CacheStore,
{
    store: Arc<S>,
    config: Arc<CacheConfig>,
    clock: SharedClock,
}

impl<S> ResponseCache<S>
where
    S: CacheStore + Send + Sync,
{
    pub fn new(store: Arc<S>, config: Arc<CacheConfig>, clock: SharedClock) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    pub fn should_cache(&self, request: &RequestContext) -> bool {
        services::should_cache(&self.config, request)
    }

    pub fn key(&self, path: &str, query: Option<&str>) -> CacheKey {
        services::cache_key(path, query)
    }

    /// Fresh entry for `key`
    ///
    /// Store failures and stale entries both read as a miss.
    pub async fn get(&self, key: &CacheKey) -> Option<CacheEntry> {
        let entry = match self.store.get(key).await {
            Ok(entry) => entry?,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "Cache read failed");
                return None;
            }
        };

        let now = self.clock.now_unix();
        if entry.is_fresh(now, self.config.duration_secs()) {
            Some(entry)
        } else {
            tracing::debug!(key = %key, age = now - entry.timestamp, "Cache entry stale");
            None
        }
    }

    /// Store a response body; failures are logged and dropped
    pub async fn set(&self, key: &CacheKey, body: Value, headers: BTreeMap<String, String>) {
        let entry = CacheEntry::new(body, headers, self.clock.now_unix());
        match self.store.put(key, &entry).await {
            Ok(()) => tracing::debug!(key = %key, "Cache entry stored"),
            Err(e) => tracing::warn!(key = %key, error = %e, "Cache write failed"),
        }
    }

    /// Delete every entry
    pub async fn purge_all(&self) -> CacheResult<u64> {
        let deleted = self.store.purge_all().await?;
        tracing::info!(deleted, "Response cache purged");
        Ok(deleted)
    }

    pub async fn stats(&self) -> CacheResult<CacheStats> {
        let (file_count, total_bytes) = self.store.usage().await?;
        Ok(CacheStats {
            file_count,
            total_bytes,
            cache_dir: self.config.cache_dir.clone(),
            enabled: self.config.enabled,
            ttl_secs: self.config.duration.as_secs(),
        })
    }

    /// Flush the cache if `change` can alter public responses
    pub async fn handle_content_change(&self, change: &ContentChange) -> CacheResult<u64> {
        if !self.config.enabled {
            return Err(CacheError::Disabled);
        }
        if !change.invalidates() {
            tracing::debug!(?change, "Content change does not invalidate cache");
            return Ok(0);
        }
        self.purge_all().await
    }
}
