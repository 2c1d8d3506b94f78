//! Auth Middleware
//!
//! `resolve_identity` turns request credentials into an [`Identity`]
//! extension; `require_identity` and `require_role` guard routes that need one.

use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::extract::State;
use axum::http::{Method, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use kernel::error::app_error::AppError;

use platform::rate_limit::AttemptStore;

use crate::domain::entity::identity::Identity;
use crate::domain::repository::UserDirectory;
use crate::error::AuthError;
use crate::presentation::extract::{body_token, content_type, credentials_from_parts, is_form, is_json};
use crate::presentation::handlers::AuthAppState;

/// Largest body buffered while looking for a `token` parameter
pub const BODY_TOKEN_LIMIT: usize = 1024 * 1024;

/// Middleware that attaches the authenticated identity, if any
///
/// Requests without credentials, or with credentials that do not
/// authenticate, pass through anonymously; handlers that need an identity
/// reject them.
pub async fn resolve_identity<D, S>(
    State(state): State<AuthAppState<D, S>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    D: UserDirectory + Send + Sync + 'static,
    S: AttemptStore + Send + Sync + 'static,
{
    if !state.config().jwt_enabled {
        return next.run(req).await;
    }

    let mut credentials = credentials_from_parts(req.headers(), req.uri().query());
    let mut req = req;

    if credentials.is_empty() && may_carry_body_token(&req) {
        let content_type = content_type(req.headers());
        let (parts, body) = req.into_parts();

        let bytes = match to_bytes(body, BODY_TOKEN_LIMIT).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "Request body could not be buffered");
                return AppError::bad_request("Request body could not be read").into_response();
            }
        };

        credentials.body_token = body_token(content_type.as_deref(), &bytes);
        req = Request::from_parts(parts, Body::from(bytes));
    }

    if credentials.is_empty() {
        return next.run(req).await;
    }

    match state.authenticate_use_case().execute(&credentials).await {
        Ok(identity) => {
            tracing::debug!(user_id = %identity.id, "Request authenticated");
            req.extensions_mut().insert(identity);
        }
        Err(AuthError::InvalidToken | AuthError::Unauthenticated) => {
            tracing::debug!("Request credentials rejected");
        }
        Err(e) => return e.into_response(),
    }

    next.run(req).await
}

/// Middleware that requires an identity attached by [`resolve_identity`]
pub async fn require_identity(req: Request<Body>, next: Next) -> Result<Response, Response> {
    if req.extensions().get::<Identity>().is_none() {
        return Err(AuthError::Unauthenticated.into_response());
    }

    Ok(next.run(req).await)
}

/// Role a guarded route requires, used as middleware state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredRole(Arc<str>);

impl RequiredRole {
    pub fn new(role: impl Into<Arc<str>>) -> Self {
        Self(role.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Middleware that requires an identity holding the given role
///
/// No identity answers 401; an identity without the role answers 403.
pub async fn require_role(
    State(role): State<RequiredRole>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    let Some(identity) = req.extensions().get::<Identity>() else {
        return Err(AuthError::Unauthenticated.into_response());
    };

    if !identity.has_role(role.as_str()) {
        tracing::debug!(user_id = %identity.id, role = role.as_str(), "Role missing");
        return Err(AuthError::Forbidden.into_response());
    }

    Ok(next.run(req).await)
}

fn may_carry_body_token(req: &Request<Body>) -> bool {
    let has_body_method = matches!(
        *req.method(),
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    );
    let content_type = content_type(req.headers());
    has_body_method && (is_form(content_type.as_deref()) || is_json(content_type.as_deref()))
}
