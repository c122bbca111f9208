//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, bearer gate
//!
//! ## Features
//! - Registration with email verification
//! - Login with a short-lived access JWT and a rotating refresh JWT
//! - Forgot-password flow with five-minute reset tokens
//! - Role registry (admin, user, master) and admin user management
//! - Profiles with avatar upload
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optionally peppered
//! - Refresh tokens stored as digests; a login ends every earlier session
//! - Verification and reset tokens compared in constant time
//! - Missing or invalid access token is 401, a role outside the allow-list is 403

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::bootstrap::{AdminSeed, ensure_admin};
pub use application::config::AuthConfig;
pub use application::token::TokenIssuer;
pub use domain::value_object::user_role::UserRole;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{ADMIN_ONLY, AuthGate, AuthUser, MEMBERS};
pub use presentation::router::{PgAuthState, auth_routes, users_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
