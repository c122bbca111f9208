//! Refresh Token Entity
//!
//! One row per live refresh token. Only the digest of the JWT is stored.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshToken {
    pub id: Uuid,
    pub user_id: UserId,
    /// `platform::crypto::token_digest` of the issued JWT
    pub token_digest: String,
    pub created_at: DateTime<Utc>,
}

impl RefreshToken {
    pub fn new(user_id: UserId, token: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            token_digest: platform::crypto::token_digest(token),
            created_at: Utc::now(),
        }
    }
}
