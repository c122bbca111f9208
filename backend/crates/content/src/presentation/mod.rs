//! Presentation Layer
//!
//! HTTP handlers, DTOs and router.

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::ContentAppState;
pub use router::{PgContentState, categories_router, content_routes, posts_router};
