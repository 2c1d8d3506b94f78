//! Client identification utilities
//!
//! Resolves the client address used as the login-throttling key.

use http::HeaderMap;
use std::net::IpAddr;

/// Throttle key used when no address can be determined
pub const UNKNOWN_CLIENT: &str = "unknown";

/// Extract client IP address from headers
///
/// Precedence (reverse proxy setups first):
/// 1. first entry of `X-Forwarded-For`
/// 2. `X-Real-IP`
/// 3. the direct connection address
///
/// Header values that do not parse as an IP address are skipped.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    if let Some(xff) = headers.get("x-forwarded-for").and_then(|v| v.to_str().ok()) {
        if let Some(first_ip) = xff.split(',').next() {
            if let Ok(ip) = first_ip.trim().parse::<IpAddr>() {
                return Some(ip);
            }
        }
    }

    if let Some(real_ip) = headers.get("x-real-ip").and_then(|v| v.to_str().ok()) {
        if let Ok(ip) = real_ip.trim().parse::<IpAddr>() {
            return Some(ip);
        }
    }

    direct_ip
}

/// Throttle key for a resolved client address
pub fn client_key(ip: Option<IpAddr>) -> String {
    ip.map(|ip| ip.to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}
