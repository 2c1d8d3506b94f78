//! Repository Traits
//!
//! Interfaces for user lookup. Implementation is in infrastructure layer.

use platform::password::ClearTextPassword;

use crate::domain::entity::identity::Identity;
use crate::domain::value_object::user_id::UserId;
use crate::error::AuthResult;

/// User directory trait
#[trait_variant::make(UserDirectory: Send)]
pub trait LocalUserDirectory {
    /// Resolve a user by login name and password
    ///
    /// Returns `None` for an unknown user, a wrong password, or an inactive
    /// account. Callers must not be able to tell these apart.
    async fn verify_credentials(
        &self,
        username: &str,
        password: &ClearTextPassword,
    ) -> AuthResult<Option<Identity>>;

    /// Find user by ID
    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<Identity>>;
}
