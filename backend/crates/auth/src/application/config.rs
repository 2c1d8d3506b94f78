//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Secret length generated when none is configured
pub const GENERATED_SECRET_LEN: usize = 32;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Whether bearer tokens are issued and accepted at all
    pub jwt_enabled: bool,
    /// HMAC-SHA256 signing key
    pub jwt_secret: Vec<u8>,
    /// Token lifetime
    pub token_ttl: Duration,
    /// Failures allowed per client before lockout
    pub max_login_attempts: u32,
    /// Lockout window, also the TTL of the failure counter
    pub lockout_duration: Duration,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_enabled: true,
            jwt_secret: Vec::new(),
            token_ttl: Duration::from_secs(3600),
            max_login_attempts: 5,
            lockout_duration: Duration::from_secs(3600),
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret
    ///
    /// Tokens do not survive a restart with a generated secret.
    pub fn with_random_secret() -> Self {
        Self {
            jwt_secret: platform::crypto::random_bytes(GENERATED_SECRET_LEN),
            ..Default::default()
        }
    }

    pub fn with_secret(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: secret.into(),
            ..Default::default()
        }
    }

    pub fn token_ttl_secs(&self) -> i64 {
        i64::try_from(self.token_ttl.as_secs()).unwrap_or(i64::MAX)
    }

    pub fn lockout_secs(&self) -> i64 {
        i64::try_from(self.lockout_duration.as_secs()).unwrap_or(i64::MAX)
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_enabled", &self.jwt_enabled)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("max_login_attempts", &self.max_login_attempts)
            .field("lockout_duration", &self.lockout_duration)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::default();
        assert!(config.jwt_enabled);
        assert_eq!(config.token_ttl_secs(), 3600);
        assert_eq!(config.max_login_attempts, 5);
        assert_eq!(config.lockout_secs(), 3600);
    }

    #[test]
    fn test_random_secret() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.jwt_secret.len(), GENERATED_SECRET_LEN);
        assert_ne!(a.jwt_secret, b.jwt_secret);
    }

    #[test]
    fn test_debug_redacts_secret() {
        let config = AuthConfig::with_secret(b"super-secret".to_vec());
        assert!(!format!("{:?}", config).contains("super-secret"));
    }
}
