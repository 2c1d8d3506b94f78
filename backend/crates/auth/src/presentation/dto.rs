//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::token_service::IssuedToken;
use crate::domain::entity::identity::Identity;
use crate::domain::value_object::user_id::UserId;

pub const TOKEN_TYPE_BEARER: &str = "Bearer";

// ============================================================================
// Login
// ============================================================================

/// Login request
///
/// Missing fields default to empty and fail credential verification.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Public user fields; the password hash is never serialized
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub roles: Vec<String>,
}

impl From<&Identity> for UserResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            id: identity.id,
            username: identity.username.clone(),
            email: identity.email.clone(),
            display_name: identity.display_name.clone(),
            roles: identity.roles.clone(),
        }
    }
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
    pub expires_in: u64,
    pub token_type: String,
}

impl LoginResponse {
    pub fn new(token: IssuedToken, identity: &Identity) -> Self {
        Self {
            token: token.token,
            user: UserResponse::from(identity),
            expires_in: token.expires_in,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

// ============================================================================
// Refresh / Verify / Logout
// ============================================================================

/// Refresh response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub token: String,
    pub expires_in: u64,
    pub token_type: String,
}

impl From<IssuedToken> for RefreshResponse {
    fn from(token: IssuedToken) -> Self {
        Self {
            token: token.token,
            expires_in: token.expires_in,
            token_type: TOKEN_TYPE_BEARER.to_string(),
        }
    }
}

/// Verify response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyResponse {
    pub valid: bool,
    pub user: UserResponse,
}

/// Logout response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}
