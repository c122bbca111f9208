//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    category::Category, comment::PostComment, post::Post, report::ReportComment, tag::Tag,
};
pub use repository::{
    CategoryRepository, CommentRepository, ContentStore, PostOrder, PostQuery, PostRepository,
    ReportRepository, TagRepository,
};
