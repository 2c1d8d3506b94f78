//! Server Settings
//!
//! Built once from the environment (after `.env` is loaded) and split into
//! the per-crate configs.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use auth::AuthConfig;
use platform::config::{ConfigError, env_flag, env_opt, env_or};
use response_cache::CacheConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
pub const DEFAULT_USERS_FILE: &str = "./users.json";
pub const DEFAULT_ADMIN_ROLE: &str = "administrator";

/// Allowed cross-origin callers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    /// `*`: any origin, without credentials
    Any,
    /// Explicit allow-list, with credentials
    List(Vec<String>),
}

impl CorsOrigins {
    pub fn parse(raw: &str) -> Self {
        let origins: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(str::to_string)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}

#[derive(Debug, Clone)]
pub struct CorsSettings {
    pub enabled: bool,
    pub origins: CorsOrigins,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub users_file: PathBuf,
    pub auth: AuthConfig,
    pub cache: CacheConfig,
    pub cors: CorsSettings,
    /// Role required by the cache admin and detailed status routes
    pub admin_role: String,
    /// Whether the signing secret was generated for this process only
    pub generated_secret: bool,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        let bind_addr = env_or("BIND_ADDR", parse_default_addr())?;
        let users_file = env_opt("USERS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_USERS_FILE));

        let (auth_base, generated_secret) = match env_opt("JWT_SECRET") {
            Some(secret) => (AuthConfig::with_secret(secret.into_bytes()), false),
            None => (AuthConfig::with_random_secret(), true),
        };
        let auth = AuthConfig {
            jwt_enabled: env_flag("JWT_ENABLED", true)?,
            token_ttl: secs("JWT_EXPIRATION_SECS", 3600)?,
            max_login_attempts: env_or("MAX_LOGIN_ATTEMPTS", 5)?,
            lockout_duration: secs("LOCKOUT_DURATION_SECS", 3600)?,
            ..auth_base
        };

        let cache_defaults = CacheConfig::default();
        let cache = CacheConfig {
            enabled: env_flag("CACHE_ENABLED", true)?,
            duration: secs("CACHE_DURATION_SECS", 3600)?,
            cache_dir: env_opt("CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(cache_defaults.cache_dir.clone()),
            api_prefix: env_opt("API_PREFIX").unwrap_or(cache_defaults.api_prefix.clone()),
            sweep_interval: secs("CACHE_SWEEP_INTERVAL_SECS", 86_400)?,
            max_body_bytes: env_or("CACHE_MAX_BODY_BYTES", cache_defaults.max_body_bytes)?,
            ..cache_defaults
        };

        let cors = CorsSettings {
            enabled: env_flag("CORS_ENABLED", true)?,
            origins: CorsOrigins::parse(&env_opt("CORS_ORIGINS").unwrap_or_else(|| "*".into())),
        };

        let admin_role = env_opt("ADMIN_ROLE").unwrap_or_else(|| DEFAULT_ADMIN_ROLE.into());

        Ok(Self {
            bind_addr,
            users_file,
            auth,
            cache,
            cors,
            admin_role,
            generated_secret,
        })
    }
}

fn secs(key: &str, default: u64) -> Result<Duration, ConfigError> {
    env_or(key, default).map(Duration::from_secs)
}

fn parse_default_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 31113))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_origins() {
        assert_eq!(CorsOrigins::parse("*"), CorsOrigins::Any);
        assert_eq!(CorsOrigins::parse(""), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::parse("https://a.example, https://b.example,"),
            CorsOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
        assert_eq!(CorsOrigins::parse("https://a.example,*"), CorsOrigins::Any);
    }

    #[test]
    fn test_default_addr_matches_constant() {
        assert_eq!(parse_default_addr().to_string(), DEFAULT_BIND_ADDR);
    }
}
