//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use std::sync::Arc;

use platform::clock::SharedClock;
use platform::rate_limit::AttemptStore;

use crate::application::config::AuthConfig;
use crate::application::{
    AuthenticateUseCase, LoginInput, LoginThrottle, LoginUseCase, RefreshTokenUseCase,
    TokenService,
};
use crate::domain::repository::UserDirectory;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, LoginResponse, LogoutResponse, RefreshResponse, UserResponse, VerifyResponse,
};
use crate::presentation::extract::{ClientIp, CurrentIdentity, JsonOrForm};

/// Shared state for auth handlers and the identity middleware
pub struct AuthAppState<D, S>
where
    D: UserDirectory + Send + Sync + 'static,
    S: AttemptStore + Send + Sync + 'static,
{
    pub directory: Arc<D>,
    pub throttle: Arc<LoginThrottle<S>>,
    pub tokens: Arc<TokenService>,
}

impl<D, S> AuthAppState<D, S>
where
    D: UserDirectory + Send + Sync + 'static,
    S: AttemptStore + Send + Sync + 'static,
{
    pub fn new(directory: D, attempts: S, config: AuthConfig, clock: SharedClock) -> Self {
        Self::with_attempt_store(directory, Arc::new(attempts), config, clock)
    }

    /// Build the state around an attempt store the caller keeps a handle to
    pub fn with_attempt_store(
        directory: D,
        attempts: Arc<S>,
        config: AuthConfig,
        clock: SharedClock,
    ) -> Self {
        let config = Arc::new(config);
        Self {
            directory: Arc::new(directory),
            throttle: Arc::new(LoginThrottle::new(attempts, config.clone(), clock.clone())),
            tokens: Arc::new(TokenService::new(config, clock)),
        }
    }

    pub fn config(&self) -> &AuthConfig {
        self.tokens.config()
    }

    pub fn login_use_case(&self) -> LoginUseCase<D, S> {
        LoginUseCase::new(
            self.directory.clone(),
            self.throttle.clone(),
            self.tokens.clone(),
        )
    }

    pub fn authenticate_use_case(&self) -> AuthenticateUseCase<D> {
        AuthenticateUseCase::new(self.directory.clone(), self.tokens.clone())
    }
}

impl<D, S> Clone for AuthAppState<D, S>
where
    D: UserDirectory + Send + Sync + 'static,
    S: AttemptStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            directory: self.directory.clone(),
            throttle: self.throttle.clone(),
            tokens: self.tokens.clone(),
        }
    }
}

// ============================================================================
// Login
// ============================================================================

/// POST /auth/v1/login
pub async fn login<D, S>(
    State(state): State<AuthAppState<D, S>>,
    client_ip: ClientIp,
    JsonOrForm(req): JsonOrForm<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    D: UserDirectory + Send + Sync + 'static,
    S: AttemptStore + Send + Sync + 'static,
{
    let input = LoginInput {
        username: req.username,
        password: req.password,
        client: client_ip.key(),
    };

    let output = state.login_use_case().execute(input).await?;

    Ok(Json(LoginResponse::new(output.token, &output.identity)))
}

// ============================================================================
// Token maintenance (bearer required)
// ============================================================================

/// POST /auth/v1/refresh
pub async fn refresh<D, S>(
    State(state): State<AuthAppState<D, S>>,
    CurrentIdentity(identity): CurrentIdentity,
) -> AuthResult<Json<RefreshResponse>>
where
    D: UserDirectory + Send + Sync + 'static,
    S: AttemptStore + Send + Sync + 'static,
{
    let use_case = RefreshTokenUseCase::new(state.tokens.clone());
    let token = use_case.execute(&identity)?;

    Ok(Json(RefreshResponse::from(token)))
}

/// GET /auth/v1/verify
pub async fn verify(CurrentIdentity(identity): CurrentIdentity) -> Json<VerifyResponse> {
    Json(VerifyResponse {
        valid: true,
        user: UserResponse::from(&identity),
    })
}

/// POST /auth/v1/logout
///
/// Tokens are not revoked server-side; the client discards its copy.
pub async fn logout(CurrentIdentity(identity): CurrentIdentity) -> Json<LogoutResponse> {
    tracing::info!(user_id = %identity.id, "User logged out");

    Json(LogoutResponse {
        message: "Logged out successfully".to_string(),
    })
}
