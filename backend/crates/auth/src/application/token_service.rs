//! Token Service
//!
//! Issues and validates signed bearer tokens. Tokens are stateless: nothing
//! is stored server-side, so a token stays valid until `exp`.

use std::sync::Arc;

use platform::clock::SharedClock;

use crate::application::config::AuthConfig;
use crate::domain::token::{self, TokenClaims, TokenHeader, TokenSegments};
use crate::error::{AuthError, AuthResult};

/// Freshly issued token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// Compact `header.payload.signature` string
    pub token: String,
    pub claims: TokenClaims,
    /// Lifetime in seconds
    pub expires_in: u64,
}

/// Token that passed every check
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    pub header: TokenHeader,
    pub claims: TokenClaims,
}

impl ValidatedToken {
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }
}

pub struct TokenService {
    config: Arc<AuthConfig>,
    clock: SharedClock,
}

impl TokenService {
    pub fn new(config: Arc<AuthConfig>, clock: SharedClock) -> Self {
        Self { config, clock }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Issue a token for `subject` valid from now for the configured TTL
    pub fn issue_token(&self, subject: &str) -> AuthResult<IssuedToken> {
        let now = self.clock.now_unix();
        let claims = TokenClaims::new(subject, now, self.config.token_ttl_secs());

        let header_segment = token::encode_segment(&TokenHeader::hs256())
            .map_err(|e| AuthError::Internal(e.to_string()))?;
        let payload_segment =
            token::encode_segment(&claims).map_err(|e| AuthError::Internal(e.to_string()))?;

        let token = token::sign(&self.config.jwt_secret, &header_segment, &payload_segment);

        tracing::debug!(subject = %claims.sub, jti = %claims.jti, exp = claims.exp, "Token issued");

        Ok(IssuedToken {
            token,
            claims,
            expires_in: self.config.token_ttl.as_secs(),
        })
    }

    /// Validate a compact token
    ///
    /// Every failure maps to [`AuthError::InvalidToken`]; the reason is only
    /// logged at debug level.
    pub fn validate_token(&self, token: &str) -> AuthResult<ValidatedToken> {
        let reject = |reason: &'static str| {
            tracing::debug!(reason, "Token rejected");
            AuthError::InvalidToken
        };

        let segments = TokenSegments::split(token).ok_or_else(|| reject("malformed"))?;

        let header = segments.header().ok_or_else(|| reject("bad header"))?;
        if !header.is_supported() {
            return Err(reject("unsupported algorithm"));
        }

        let claims = segments.claims().ok_or_else(|| reject("bad payload"))?;
        if claims.is_expired(self.clock.now_unix()) {
            return Err(reject("expired"));
        }

        if !segments.signature_matches(&self.config.jwt_secret) {
            return Err(reject("signature mismatch"));
        }

        Ok(ValidatedToken { header, claims })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::clock::{Clock, ManualClock};
    use std::time::Duration;

    fn service() -> (TokenService, ManualClock) {
        let clock = ManualClock::new(1_700_000_000);
        let config = AuthConfig::with_secret(b"unit-test-secret".to_vec());
        (TokenService::new(Arc::new(config), clock.shared()), clock)
    }

    #[test]
    fn test_issue_sets_times_from_clock() {
        let (service, clock) = service();
        let issued = service.issue_token("12").unwrap();

        assert_eq!(issued.claims.iat, clock.now_unix());
        assert_eq!(issued.claims.exp, clock.now_unix() + 3600);
        assert_eq!(issued.expires_in, 3600);
        assert_eq!(issued.token.split('.').count(), 3);
    }

    #[test]
    fn test_round_trip() {
        let (service, _clock) = service();
        let issued = service.issue_token("12").unwrap();
        let validated = service.validate_token(&issued.token).unwrap();

        assert_eq!(validated.subject(), "12");
        assert_eq!(validated.claims, issued.claims);
        assert_eq!(validated.header, TokenHeader::hs256());
    }

    #[test]
    fn test_expiry() {
        let (service, clock) = service();
        let issued = service.issue_token("12").unwrap();

        clock.advance(Duration::from_secs(3600));
        assert!(service.validate_token(&issued.token).is_ok());

        clock.advance(Duration::from_secs(1));
        assert!(matches!(
            service.validate_token(&issued.token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let (service, clock) = service();
        let issued = service.issue_token("12").unwrap();

        let other = TokenService::new(
            Arc::new(AuthConfig::with_secret(b"another-secret".to_vec())),
            clock.shared(),
        );
        assert!(other.validate_token(&issued.token).is_err());
    }

    #[test]
    fn test_unsupported_algorithm_rejected() {
        let (service, clock) = service();
        let header = token::encode_segment(&TokenHeader {
            typ: "JWT".to_string(),
            alg: "none".to_string(),
        })
        .unwrap();
        let claims = TokenClaims::new("12", clock.now_unix(), 60);
        let payload = token::encode_segment(&claims).unwrap();
        let forged = token::sign(b"unit-test-secret", &header, &payload);

        assert!(service.validate_token(&forged).is_err());
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        let (service, _clock) = service();
        for token in ["", "abc", "a.b", "a.b.c", "a..c", "...", "a.b.c.d"] {
            assert!(
                matches!(service.validate_token(token), Err(AuthError::InvalidToken)),
                "accepted {token:?}"
            );
        }
    }
}
