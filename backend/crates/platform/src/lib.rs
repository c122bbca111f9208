//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the domain crates:
//! - Password policy and Argon2id hashing
//! - Random tokens, digests and constant-time comparison
//! - Refresh-token cookie handling
//! - Slug generation for categories, tags and posts
//! - Outbound mail over SMTP
//! - Local media storage for uploads

pub mod cookie;
pub mod crypto;
pub mod mail;
pub mod media;
pub mod password;
pub mod slug;
