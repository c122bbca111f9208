//! User Card

use kernel::id::UserId;

/// Public profile shown in follower and following lists
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserCard {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
}
