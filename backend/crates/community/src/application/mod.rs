//! Application Layer
//!
//! Use cases and application services.

pub mod config;
pub mod contact;
pub mod dashboard;
pub mod favorite;
pub mod follow;
pub mod video;

// Re-exports
pub use config::CommunityConfig;
pub use contact::ContactUseCase;
pub use dashboard::DashboardUseCase;
pub use favorite::FavoriteUseCase;
pub use follow::FollowUseCase;
pub use video::VideoUseCase;
