//! Time Source
//!
//! Token expiry, lockout windows and cache freshness are all computed in unix
//! seconds from a [`Clock`]. Production code uses [`SystemClock`]; tests drive
//! a [`ManualClock`] forward instead of sleeping.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use chrono::Utc;

/// Source of the current time in unix seconds
pub trait Clock: Send + Sync + 'static {
    fn now_unix(&self) -> i64;
}

/// Shared, type-erased clock handle
pub type SharedClock = Arc<dyn Clock>;

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn shared() -> SharedClock {
        Arc::new(SystemClock)
    }
}

impl Clock for SystemClock {
    fn now_unix(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Manually advanced clock
///
/// Clones share the same instant, so a test can hand one copy to a service
/// and keep another to move time forward.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<AtomicI64>,
}

impl ManualClock {
    pub fn new(start_unix: i64) -> Self {
        Self {
            now: Arc::new(AtomicI64::new(start_unix)),
        }
    }

    /// Start at the current wall-clock time
    pub fn starting_now() -> Self {
        Self::new(Utc::now().timestamp())
    }

    pub fn advance(&self, by: Duration) {
        let secs = i64::try_from(by.as_secs()).unwrap_or(i64::MAX);
        self.now.fetch_add(secs, Ordering::SeqCst);
    }

    pub fn set(&self, unix: i64) {
        self.now.store(unix, Ordering::SeqCst);
    }

    pub fn shared(&self) -> SharedClock {
        Arc::new(self.clone())
    }
}

impl Clock for ManualClock {
    fn now_unix(&self) -> i64 {
        self.now.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_clock_advances_all_clones() {
        let clock = ManualClock::new(1_000);
        let shared = clock.shared();

        clock.advance(Duration::from_secs(61));
        assert_eq!(shared.now_unix(), 1_061);

        clock.set(5);
        assert_eq!(shared.now_unix(), 5);
    }

    #[test]
    fn test_system_clock_is_recent() {
        // 2024-01-01T00:00:00Z
        assert!(SystemClock.now_unix() > 1_704_067_200);
    }
}
