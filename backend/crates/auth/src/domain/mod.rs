//! Domain Layer
//!
//! Contains entities, value objects, the token format, and repository traits.

pub mod entity;
pub mod repository;
pub mod token;
pub mod value_object;

// Re-exports
pub use entity::identity::Identity;
pub use repository::UserDirectory;
pub use token::{TokenClaims, TokenHeader};
pub use value_object::user_id::UserId;
