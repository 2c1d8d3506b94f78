//! Repository Traits
//!
//! Interfaces for entry persistence. Implementation is in infrastructure layer.

use crate::domain::entities::CacheEntry;
use crate::domain::value_objects::CacheKey;
use crate::error::CacheResult;

/// Storage of cached responses
#[trait_variant::make(CacheStore: Send)]
pub trait LocalCacheStore {
    /// Read an entry regardless of age; `None` when absent or unreadable
    async fn get(&self, key: &CacheKey) -> CacheResult<Option<CacheEntry>>;

    /// Write an entry, replacing any previous one
    async fn put(&self, key: &CacheKey, entry: &CacheEntry) -> CacheResult<()>;

    /// Remove every entry, returning how many were removed
    async fn purge_all(&self) -> CacheResult<u64>;

    /// Count entries and their total size in bytes
    async fn usage(&self) -> CacheResult<(u64, u64)>;
}
