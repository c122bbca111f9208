//! Application Layer
//!
//! Use cases and application services.

pub mod category;
pub mod comment;
pub mod config;
pub mod post;
pub mod report;

// Re-exports
pub use category::CategoryUseCase;
pub use comment::{CommentRecord, CommentUseCase};
pub use config::ContentConfig;
pub use post::{PostFilter, PostInput, PostUseCase};
pub use report::{ReportOutcome, ReportUseCase};
