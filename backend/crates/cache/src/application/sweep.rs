//! Periodic Cache Sweep
//!
//! Entries are only checked for age when read, so files for URLs nobody
//! requests again would stay forever. A background task purges the whole
//! directory on a fixed period.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};

use crate::application::response_cache::ResponseCache;
use crate::domain::repository::CacheStore;

/// Start the sweeper; `None` when caching is disabled
pub fn spawn_sweeper<S>(cache: Arc<ResponseCache<S>>, period: Duration) -> Option<JoinHandle<()>>
where
    S: CacheStore + Send + Sync + 'static,
{
    if !cache.is_enabled() || period.is_zero() {
        return None;
    }

    Some(tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            match cache.purge_all().await {
                Ok(deleted) => tracing::info!(deleted, "Scheduled cache sweep finished"),
                Err(e) => tracing::warn!(error = %e, "Scheduled cache sweep failed"),
            }
        }
    }))
}
