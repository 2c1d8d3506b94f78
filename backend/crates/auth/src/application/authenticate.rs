//! Authenticate Use Case
//!
//! Resolves the bearer token carried by a request into an [`Identity`].

use std::sync::Arc;

use crate::application::token_service::TokenService;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// Places a request may carry a token, in lookup order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestCredentials {
    /// Raw `Authorization` header value
    pub authorization: Option<String>,
    /// `token` query parameter
    pub query_token: Option<String>,
    /// `token` body parameter (form or JSON)
    pub body_token: Option<String>,
}

impl RequestCredentials {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self {
            authorization: Some(format!("Bearer {}", token.into())),
            ..Default::default()
        }
    }

    /// First usable token: bearer header, then query, then body
    ///
    /// A non-bearer `Authorization` header (e.g. `Basic`) is skipped.
    pub fn token(&self) -> Option<&str> {
        self.authorization
            .as_deref()
            .and_then(parse_bearer)
            .or_else(|| non_empty(self.query_token.as_deref()))
            .or_else(|| non_empty(self.body_token.as_deref()))
    }

    pub fn is_empty(&self) -> bool {
        self.token().is_none()
    }
}

/// Extract the token from `Bearer <token>` (scheme is case-insensitive)
pub fn parse_bearer(value: &str) -> Option<&str> {
    let (scheme, token) = value.trim().split_once(char::is_whitespace)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    non_empty(Some(token.trim()))
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub struct AuthenticateUseCase<D>
where
    D: UserDirectory,
{
    directory: Arc<D>,
    tokens: Arc<TokenService>,
}

impl<D> AuthenticateUseCase<D>
where
    D: UserDirectory + Send + Sync + 'static,
{
    pub fn new(directory: Arc<D>, tokens: Arc<TokenService>) -> Self {
        Self { directory, tokens }
    }

    pub async fn execute(&self, credentials: &RequestCredentials) -> AuthResult<Identity> {
        if !self.tokens.config().jwt_enabled {
            return Err(AuthError::Unauthenticated);
        }

        let token = credentials.token().ok_or(AuthError::Unauthenticated)?;
        let validated = self.tokens.validate_token(token)?;

        let user_id: UserId = validated
            .subject()
            .parse()
            .map_err(|_| AuthError::InvalidToken)?;

        let identity = self
            .directory
            .find_by_id(user_id)
            .await?
            .filter(Identity::can_authenticate)
            .ok_or_else(|| {
                tracing::debug!(user_id = %user_id, "Token subject no longer authenticates");
                AuthError::Unauthenticated
            })?;

        Ok(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bearer() {
        assert_eq!(parse_bearer("Bearer abc.def.ghi"), Some("abc.def.ghi"));
        assert_eq!(parse_bearer("bearer   abc"), Some("abc"));
        assert_eq!(parse_bearer("BEARER abc"), Some("abc"));
        assert_eq!(parse_bearer("Basic dXNlcjpwYXNz"), None);
        assert_eq!(parse_bearer("Bearer"), None);
        assert_eq!(parse_bearer("Bearer    "), None);
    }

    #[test]
    fn test_lookup_order() {
        let all = RequestCredentials {
            authorization: Some("Bearer header".to_string()),
            query_token: Some("query".to_string()),
            body_token: Some("body".to_string()),
        };
        assert_eq!(all.token(), Some("header"));

        let no_header = RequestCredentials {
            authorization: Some("Basic xyz".to_string()),
            ..all.clone()
        };
        assert_eq!(no_header.token(), Some("query"));

        let body_only = RequestCredentials {
            body_token: Some("body".to_string()),
            query_token: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(body_only.token(), Some("body"));

        assert!(RequestCredentials::default().is_empty());
    }
}
