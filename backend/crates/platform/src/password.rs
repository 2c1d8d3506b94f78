//! Password Hashing and Verification
//!
//! Credentials are checked against Argon2id hashes in PHC string format:
//! - Argon2id hashing (memory-hard, recommended by OWASP)
//! - Zeroization of submitted passwords
//! - Unicode NFKC normalization before hashing and verification
//!
//! No strength policy is applied here; a login attempt must be able to fail
//! verification rather than be rejected up front.

use std::fmt;

use argon2::{
    Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, password_hash::SaltString,
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Upper bound on accepted input, to keep hashing cost bounded
pub const MAX_PASSWORD_LENGTH: usize = 1024;

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Hashing operation failed
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    /// Invalid hash format
    #[error("Invalid password hash format")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Does not implement `Clone`, and Debug output is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Normalize (NFKC) a submitted password
    ///
    /// Returns `None` for empty input or input longer than
    /// [`MAX_PASSWORD_LENGTH`] characters.
    pub fn new(mut raw: String) -> Option<Self> {
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        let char_count = normalized.chars().count();
        if char_count == 0 || char_count > MAX_PASSWORD_LENGTH {
            let mut normalized = normalized;
            normalized.zeroize();
            return None;
        }

        Some(Self(normalized))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash the password using Argon2id with OWASP default parameters
    /// (m=19456 KiB, t=2, p=1)
    pub fn hash(&self) -> Result<HashedPassword, PasswordHashError> {
        self.hash_with(Params::default())
    }

    /// Hash the password with explicit Argon2 parameters
    pub fn hash_with(&self, params: Params) -> Result<HashedPassword, PasswordHashError> {
        let salt = SaltString::generate(OsRng);
        let argon2 = Argon2::new(argon2::Algorithm::Argon2id, argon2::Version::V0x13, params);

        let hash = argon2
            .hash_password(self.as_bytes(), &salt)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword {
            hash: hash.to_string(),
        })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

/// Cheap Argon2id parameters for fixtures and tests
///
/// Verification reads parameters from the PHC string, so hashes produced
/// with these stay verifiable by the same code path.
pub fn low_cost_params() -> Params {
    Params::new(1024, 1, 1, None).unwrap_or_default()
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Hashed password in PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Create from PHC string (e.g., from the user file)
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();

        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;

        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }

    /// Verify a password against this hash
    ///
    /// Argon2 compares digests in constant time.
    pub fn verify(&self, password: &ClearTextPassword) -> bool {
        let parsed_hash = match PasswordHash::new(&self.hash) {
            Ok(h) => h,
            Err(_) => return false,
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
