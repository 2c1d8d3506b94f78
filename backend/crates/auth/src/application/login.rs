//! Login Use Case
//!
//! Throttle check, credential verification, then token issuance.

use std::sync::Arc;

use platform::password::ClearTextPassword;
use platform::rate_limit::AttemptStore;

use crate::application::login_throttle::{LoginThrottle, ThrottleDecision};
use crate::application::token_service::{IssuedToken, TokenService};
use crate::domain::entity::identity::Identity;
use crate::domain::repository::UserDirectory;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub username: String,
    pub password: String,
    /// Throttle key (client IP)
    pub client: String,
}

/// Login output
#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub token: IssuedToken,
    pub identity: Identity,
}

pub struct LoginUseCase<D, S>
where
    D: UserDirectory,
    S: AttemptStore,
{
    directory: Arc<D>,
    throttle: Arc<LoginThrottle<S>>,
    tokens: Arc<TokenService>,
}

impl<D, S> LoginUseCase<D, S>
where
    D: UserDirectory + Send + Sync + 'static,
    S: AttemptStore + Send + Sync + 'static,
{
    pub fn new(
        directory: Arc<D>,
        throttle: Arc<LoginThrottle<S>>,
        tokens: Arc<TokenService>,
    ) -> Self {
        Self {
            directory,
            throttle,
            tokens,
        }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        if let ThrottleDecision::Locked { retry_after_secs } =
            self.throttle.check(&input.client).await?
        {
            return Err(AuthError::TooManyAttempts { retry_after_secs });
        }

        let username = input.username.trim();
        let identity = match ClearTextPassword::new(input.password) {
            Some(password) if !username.is_empty() => {
                self.directory
                    .verify_credentials(username, &password)
                    .await?
            }
            _ => None,
        };

        let Some(identity) = identity.filter(Identity::can_authenticate) else {
            self.throttle
                .record_login_result(&input.client, false)
                .await?;
            return Err(AuthError::InvalidCredentials);
        };

        self.throttle
            .record_login_result(&input.client, true)
            .await?;

        let token = self.tokens.issue_token(&identity.subject())?;

        tracing::info!(
            user_id = %identity.id,
            client = %input.client,
            jti = %token.claims.jti,
            "User logged in"
        );

        Ok(LoginOutput { token, identity })
    }
}
