//! Content Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Posts with draft / published / blocked status, thumbnails and tags
//! - Categories with unique Vietnamese-aware slugs
//! - Two-level comments with atomic comment counters
//! - Comment reports resolved by deleting the reported comment
//!
//! Access control comes from the `auth` crate's bearer gate.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::ContentConfig;
pub use error::{ContentError, ContentResult};
pub use infra::postgres::PgContentRepository;
pub use presentation::router::{PgContentState, content_routes};
