//! Compact Token Format
//!
//! `base64url(header) "." base64url(claims) "." base64url(HMAC-SHA256)`,
//! all segments without padding. The MAC covers the first two segments
//! exactly as transmitted.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use kernel::id::TokenId;
use platform::crypto::{constant_time_eq, from_base64url, hmac_sha256, to_base64url};

pub const TOKEN_TYPE: &str = "JWT";
pub const ALGORITHM: &str = "HS256";

/// Token header segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub typ: String,
    pub alg: String,
}

impl TokenHeader {
    pub fn hs256() -> Self {
        Self {
            typ: TOKEN_TYPE.to_string(),
            alg: ALGORITHM.to_string(),
        }
    }

    pub fn is_supported(&self) -> bool {
        self.alg == ALGORITHM
    }
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self::hs256()
    }
}

/// Token payload segment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expires at (unix seconds)
    pub exp: i64,
    /// Subject: the user ID in decimal form
    pub sub: String,
    /// Unique token ID (UUIDv4)
    pub jti: String,
}

impl TokenClaims {
    pub fn new(subject: impl Into<String>, issued_at: i64, ttl_secs: i64) -> Self {
        Self {
            iat: issued_at,
            exp: issued_at.saturating_add(ttl_secs),
            sub: subject.into(),
            jti: TokenId::new().to_string(),
        }
    }

    /// A token is still accepted at the exact second of `exp`
    pub fn is_expired(&self, now: i64) -> bool {
        self.exp < now
    }
}

/// A compact token split into its three segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSegments<'a> {
    pub header: &'a str,
    pub payload: &'a str,
    pub signature: &'a str,
}

impl<'a> TokenSegments<'a> {
    /// Split on `.`; anything other than three non-empty segments is rejected
    pub fn split(token: &'a str) -> Option<Self> {
        let mut parts = token.split('.');
        let header = parts.next()?;
        let payload = parts.next()?;
        let signature = parts.next()?;

        if parts.next().is_some() || header.is_empty() || payload.is_empty() || signature.is_empty()
        {
            return None;
        }

        Some(Self {
            header,
            payload,
            signature,
        })
    }

    pub fn signing_input(&self) -> String {
        format!("{}.{}", self.header, self.payload)
    }

    pub fn header(&self) -> Option<TokenHeader> {
        decode_segment(self.header)
    }

    pub fn claims(&self) -> Option<TokenClaims> {
        decode_segment(self.payload)
    }

    /// Recompute the MAC and compare it with the supplied one in constant time
    pub fn signature_matches(&self, secret: &[u8]) -> bool {
        let Ok(supplied) = from_base64url(self.signature) else {
            return false;
        };
        let expected = hmac_sha256(secret, self.signing_input().as_bytes());
        constant_time_eq(&expected, &supplied)
    }
}

/// JSON-encode a value as one base64url segment
pub fn encode_segment<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(to_base64url(&serde_json::to_vec(value)?))
}

pub fn decode_segment<T: DeserializeOwned>(segment: &str) -> Option<T> {
    let bytes = from_base64url(segment).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Sign `header.payload` and return the full compact token
pub fn sign(secret: &[u8], header_segment: &str, payload_segment: &str) -> String {
    let signing_input = format!("{}.{}", header_segment, payload_segment);
    let signature = hmac_sha256(secret, signing_input.as_bytes());
    format!("{}.{}", signing_input, to_base64url(&signature))
}
