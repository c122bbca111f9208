//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    ADMIN_ONLY, AuthGate, AuthUser, MEMBERS, RoleGate, require_auth, require_role,
};
pub use router::{
    PgAuthState, auth_router, auth_routes, roles_router, users_router, verification_router,
};
