//! Environment Configuration Helpers
//!
//! Typed readers for the `KEY=value` settings loaded by the binary (after
//! `dotenvy`). Parsing is split from the environment lookup so it can be
//! tested without mutating process state.

use std::str::FromStr;

use thiserror::Error;

/// Invalid configuration value
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value for {key}: {value:?} ({reason})")]
pub struct ConfigError {
    pub key: String,
    pub value: String,
    pub reason: String,
}

/// Read a variable, treating empty or whitespace-only values as unset
pub fn env_opt(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read and parse a variable, falling back to `default` when unset
pub fn env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    parse_or(key, env_opt(key).as_deref(), default)
}

/// Read a boolean flag, falling back to `default` when unset
pub fn env_flag(key: &str, default: bool) -> Result<bool, ConfigError> {
    match env_opt(key) {
        None => Ok(default),
        Some(raw) => parse_flag(&raw).ok_or_else(|| ConfigError {
            key: key.to_string(),
            value: raw,
            reason: "expected true/false".to_string(),
        }),
    }
}

/// Parse an optional raw value
pub fn parse_or<T>(key: &str, raw: Option<&str>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match raw {
        None => Ok(default),
        Some(raw) => raw.parse::<T>().map_err(|e| ConfigError {
            key: key.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        }),
    }
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive)
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
