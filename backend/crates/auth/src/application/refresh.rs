//! Refresh Token Use Case
//!
//! Re-issues a token for an identity that already authenticated with a
//! valid one. The old token is not revoked and stays valid until its `exp`.

use std::sync::Arc;

use crate::application::token_service::{IssuedToken, TokenService};
use crate::domain::entity::identity::Identity;
use crate::error::AuthResult;

pub struct RefreshTokenUseCase {
    tokens: Arc<TokenService>,
}

impl RefreshTokenUseCase {
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }

    pub fn execute(&self, identity: &Identity) -> AuthResult<IssuedToken> {
        let token = self.tokens.issue_token(&identity.subject())?;
        tracing::info!(user_id = %identity.id, jti = %token.claims.jti, "Token refreshed");
        Ok(token)
    }
}
