//! Identity Entity
//!
//! The authenticated principal resolved from credentials or a bearer token.

use serde::{Deserialize, Serialize};

use crate::domain::value_object::user_id::UserId;

/// Authenticated user as seen by request handlers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub display_name: String,
    pub roles: Vec<String>,
    /// Disabled users can neither log in nor authenticate with a token
    pub active: bool,
}

impl Identity {
    /// Value of the token `sub` claim for this identity
    pub fn subject(&self) -> String {
        self.id.to_string()
    }

    pub fn can_authenticate(&self) -> bool {
        self.active
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}
