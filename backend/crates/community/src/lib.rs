//! Community Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Follow edges between users and a feed of followed authors' posts
//! - Favorite posts
//! - Public contact form with an admin inbox
//! - Curated YouTube video links
//! - Admin dashboard aggregates

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::CommunityConfig;
pub use error::{CommunityError, CommunityResult};
pub use infra::postgres::PgCommunityRepository;
pub use presentation::router::{PgCommunityState, community_routes, users_routes};
