//! In-Memory User Directory
//!
//! Users are seeded from a JSON file at startup:
//!
//! ```json
//! [{"id": 1, "username": "admin", "email": "admin@example.com",
//!   "display_name": "Admin", "roles": ["administrator"],
//!   "password_hash": "$argon2id$v=19$...", "active": true}]
//! ```

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;

use platform::password::{ClearTextPassword, HashedPassword};

use crate::domain::entity::identity::Identity;
use crate::domain::repository::UserDirectory;
use crate::domain::value_object::user_id::UserId;
use crate::error::{AuthError, AuthResult};

/// One entry of the users file
#[derive(Debug, Clone, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    /// Argon2 PHC string
    pub password_hash: String,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Clone)]
struct StoredUser {
    identity: Identity,
    password: HashedPassword,
}

/// Process-local user directory
#[derive(Clone, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, StoredUser>>>,
}

impl InMemoryUserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<UserRecord>) -> AuthResult<Self> {
        let mut users = HashMap::with_capacity(records.len());

        for record in records {
            let password = HashedPassword::from_phc_string(record.password_hash).map_err(|e| {
                AuthError::Internal(format!("user {}: {}", record.username, e))
            })?;

            let display_name = if record.display_name.is_empty() {
                record.username.clone()
            } else {
                record.display_name
            };

            let identity = Identity {
                id: UserId::new(record.id),
                username: record.username,
                email: record.email,
                display_name,
                roles: record.roles,
                active: record.active,
            };

            if users
                .insert(identity.id, StoredUser { identity, password })
                .is_some()
            {
                return Err(AuthError::Internal(format!(
                    "duplicate user id {}",
                    record.id
                )));
            }
        }

        Ok(Self {
            users: Arc::new(RwLock::new(users)),
        })
    }

    pub fn from_json(json: &str) -> AuthResult<Self> {
        let records: Vec<UserRecord> = serde_json::from_str(json)
            .map_err(|e| AuthError::Internal(format!("invalid users file: {}", e)))?;
        Self::from_records(records)
    }

    /// Load users from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> AuthResult<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path).await.map_err(|e| {
            AuthError::Internal(format!("cannot read {}: {}", path.display(), e))
        })?;

        let directory = Self::from_json(&json)?;
        tracing::info!(
            path = %path.display(),
            users = directory.len().await,
            "User directory loaded"
        );
        Ok(directory)
    }

    /// Add or replace a user
    pub async fn insert(&self, identity: Identity, password: HashedPassword) {
        self.users
            .write()
            .await
            .insert(identity.id, StoredUser { identity, password });
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserDirectory for InMemoryUserDirectory {
    /// Matches the login name or email, ignoring ASCII case
    async fn verify_credentials(
        &self,
        username: &str,
        password: &ClearTextPassword,
    ) -> AuthResult<Option<Identity>> {
        let candidate = {
            let users = self.users.read().await;
            users
                .values()
                .find(|u| {
                    u.identity.username.eq_ignore_ascii_case(username)
                        || (!u.identity.email.is_empty()
                            && u.identity.email.eq_ignore_ascii_case(username))
                })
                .cloned()
        };

        let Some(user) = candidate else {
            return Ok(None);
        };

        if !user.password.verify(password) || !user.identity.can_authenticate() {
            return Ok(None);
        }

        Ok(Some(user.identity))
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<Identity>> {
        Ok(self
            .users
            .read()
            .await
            .get(&id)
            .map(|u| u.identity.clone()))
    }
}
