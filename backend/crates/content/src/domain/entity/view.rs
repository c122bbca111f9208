//! Read models joined across tables

use kernel::id::{CategoryId, PostId, UserId};

use crate::domain::entity::{post::Post, tag::Tag};

/// Public author fields shown next to posts, comments and reports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorCard {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRef {
    pub id: CategoryId,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone)]
pub struct PostView {
    pub post: Post,
    pub author: AuthorCard,
    pub category: Option<CategoryRef>,
    pub tags: Vec<Tag>,
}

/// Enough of a post to link to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRef {
    pub id: PostId,
    pub title: String,
    pub slug: String,
    pub thumbnail_url: String,
}
