//! Post Card
//!
//! Listing shape for favorites and the followed feed. Only published posts
//! are ever turned into cards.

use chrono::{DateTime, Utc};
use kernel::id::{CategoryId, PostId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostCard {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub thumbnail_url: String,
    pub view_count: i64,
    pub like_count: i64,
    pub comment_count: i64,
    pub created_at: DateTime<Utc>,
    pub author: CardAuthor,
    pub category: Option<CardCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardAuthor {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardCategory {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}
