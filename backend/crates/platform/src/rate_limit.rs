//! Rate Limiting Infrastructure
//!
//! Per-key failure counters with a time-to-live, used to throttle repeated
//! login failures from one client.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::clock::SharedClock;

/// Failure counter for one key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttemptCounter {
    /// Consecutive failures recorded
    pub count: u32,
    /// Unix seconds of the most recent failure
    pub last_attempt: i64,
}

impl AttemptCounter {
    pub fn first(now: i64) -> Self {
        Self {
            count: 1,
            last_attempt: now,
        }
    }

    /// Counter after one more failure at `now`
    pub fn bumped(self, now: i64) -> Self {
        Self {
            count: self.count.saturating_add(1),
            last_attempt: now,
        }
    }
}

/// Attempt storage errors
#[derive(Debug, Error)]
pub enum AttemptStoreError {
    #[error("Attempt store unavailable: {0}")]
    Unavailable(String),
}

/// Trait for attempt counter storage backends
///
/// Entries disappear once their TTL has elapsed.
#[trait_variant::make(AttemptStore: Send)]
pub trait LocalAttemptStore {
    async fn get(&self, key: &str) -> Result<Option<AttemptCounter>, AttemptStoreError>;

    async fn put(
        &self,
        key: &str,
        counter: AttemptCounter,
        ttl: Duration,
    ) -> Result<(), AttemptStoreError>;

    async fn delete(&self, key: &str) -> Result<(), AttemptStoreError>;
}

#[derive(Debug, Clone, Copy)]
struct StoredCounter {
    counter: AttemptCounter,
    expires_at: i64,
}

/// Process-local attempt store
pub struct InMemoryAttemptStore {
    entries: RwLock<HashMap<String, StoredCounter>>,
    clock: SharedClock,
}

impl InMemoryAttemptStore {
    pub fn new(clock: SharedClock) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Drop every expired entry, returning how many were removed
    pub async fn purge_expired(&self) -> usize {
        let now = self.clock.now_unix();
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, stored| stored.expires_at > now);
        before - entries.len()
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

/// Run [`InMemoryAttemptStore::purge_expired`] every `period`
///
/// Counters for clients that never come back are otherwise only dropped
/// when their key is read again.
pub fn spawn_purge_task(store: Arc<InMemoryAttemptStore>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let removed = store.purge_expired().await;
            if removed > 0 {
                tracing::debug!(removed, "Expired attempt counters purged");
            }
        }
    })
}

impl AttemptStore for InMemoryAttemptStore {
    async fn get(&self, key: &str) -> Result<Option<AttemptCounter>, AttemptStoreError> {
        let now = self.clock.now_unix();
        {
            let entries = self.entries.read().await;
            match entries.get(key) {
                None => return Ok(None),
                Some(stored) if stored.expires_at > now => return Ok(Some(stored.counter)),
                Some(_) => {}
            }
        }

        // Expired: evict unless a concurrent put refreshed it
        let mut entries = self.entries.write().await;
        match entries.get(key) {
            Some(stored) if stored.expires_at > now => Ok(Some(stored.counter)),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn put(
        &self,
        key: &str,
        counter: AttemptCounter,
        ttl: Duration,
    ) -> Result<(), AttemptStoreError> {
        let ttl_secs = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let expires_at = self.clock.now_unix().saturating_add(ttl_secs);

        self.entries
            .write()
            .await
            .insert(key.to_string(), StoredCounter { counter, expires_at });
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AttemptStoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }
}
