//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::CommunityAppState;
pub use router::{PgCommunityState, community_routes, users_routes};
