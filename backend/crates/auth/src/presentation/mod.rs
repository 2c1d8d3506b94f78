//! Presentation Layer
//!
//! HTTP handlers, DTOs, extractors, router, and middleware.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use extract::{ClientIp, CurrentIdentity, JsonOrForm};
pub use handlers::AuthAppState;
pub use middleware::{RequiredRole, require_identity, require_role, resolve_identity};
pub use router::{AUTH_NAMESPACE, auth_router, with_identity};
