//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{contact::Contact, post_card::PostCard, user_card::UserCard, video::Video};
pub use repository::{
    CommunityStore, ContactRepository, DashboardRepository, FavoriteRepository, FollowRepository,
    VideoRepository,
};
