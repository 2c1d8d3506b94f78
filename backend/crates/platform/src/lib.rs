//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC-SHA256, base64url, SHA-256 digests)
//! - Password verification (Argon2id)
//! - Client IP extraction
//! - Login attempt counters with TTL
//! - Clock abstraction (so expiry logic can run against simulated time)
//! - Environment configuration helpers

pub mod client;
pub mod clock;
pub mod config;
pub mod crypto;
pub mod password;
pub mod rate_limit;
