//! Login Throttle
//!
//! Per-client failure counting. A client that reaches `max_login_attempts`
//! failures is locked out until `lockout_duration` has passed since its most
//! recent failure.
//!
//! The check and the update are separate store operations, so concurrent
//! failures from one client can overshoot the limit by a few attempts before
//! the lockout engages.

use std::sync::Arc;

use platform::clock::SharedClock;
use platform::rate_limit::{AttemptCounter, AttemptStore};

use crate::application::config::AuthConfig;
use crate::error::AuthResult;

/// Outcome of a throttle check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThrottleDecision {
    Allowed,
    Locked { retry_after_secs: u64 },
}

impl ThrottleDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, ThrottleDecision::Allowed)
    }
}

pub struct LoginThrottle<S>
where
    S: AttemptStore,
{
    store: Arc<S>,
    config: Arc<AuthConfig>,
    clock: SharedClock,
}

impl<S> LoginThrottle<S>
where
    S: AttemptStore + Send + Sync + 'static,
{
    pub fn new(store: Arc<S>, config: Arc<AuthConfig>, clock: SharedClock) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// Whether `client` may attempt a login right now
    pub async fn check_login_allowed(&self, client: &str) -> AuthResult<bool> {
        Ok(self.check(client).await?.is_allowed())
    }

    /// Check `client` against its failure counter
    ///
    /// A counter whose lockout window has elapsed is deleted here.
    pub async fn check(&self, client: &str) -> AuthResult<ThrottleDecision> {
        let Some(counter) = self.store.get(client).await? else {
            return Ok(ThrottleDecision::Allowed);
        };

        if counter.count < self.config.max_login_attempts {
            return Ok(ThrottleDecision::Allowed);
        }

        let elapsed = self.clock.now_unix() - counter.last_attempt;
        let lockout = self.config.lockout_secs();

        if elapsed > lockout {
            self.store.delete(client).await?;
            tracing::info!(client, "Login lockout expired");
            return Ok(ThrottleDecision::Allowed);
        }

        let remaining = u64::try_from(lockout - elapsed).unwrap_or(0).max(1);
        Ok(ThrottleDecision::Locked {
            retry_after_secs: remaining,
        })
    }

    /// Record the outcome of a credential check
    ///
    /// Failure bumps the counter and re-arms its TTL; success clears it.
    pub async fn record_login_result(&self, client: &str, success: bool) -> AuthResult<()> {
        if success {
            self.store.delete(client).await?;
            return Ok(());
        }

        let now = self.clock.now_unix();
        let counter = match self.store.get(client).await? {
            Some(counter) => counter.bumped(now),
            None => AttemptCounter::first(now),
        };

        self.store
            .put(client, counter, self.config.lockout_duration)
            .await?;

        if counter.count >= self.config.max_login_attempts {
            tracing::warn!(client, failures = counter.count, "Client locked out");
        } else {
            tracing::debug!(client, failures = counter.count, "Login failure recorded");
        }

        Ok(())
    }
}
