//! Mailed one-time tokens
//!
//! Email verification and password reset links carry a random token; the
//! database keeps only its digest. Both records are deleted when consumed.
//!
//! Verification tokens do not expire. Reset tokens expire after
//! [`PASSWORD_RESET_TTL_MINUTES`] and are deleted on the first access after that.

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use platform::crypto::{constant_time_eq, token_digest};
use uuid::Uuid;

use crate::domain::value_object::email::Email;

pub const PASSWORD_RESET_TTL_MINUTES: i64 = 5;

fn digest_matches(stored: &str, presented: &str) -> bool {
    constant_time_eq(stored.as_bytes(), token_digest(presented).as_bytes())
}

#[derive(Debug, Clone)]
pub struct EmailVerification {
    pub id: Uuid,
    pub user_id: UserId,
    pub email: Email,
    pub token_digest: String,
    pub created_at: DateTime<Utc>,
}

impl EmailVerification {
    pub fn new(user_id: UserId, email: Email, token: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            email,
            token_digest: token_digest(token),
            created_at: Utc::now(),
        }
    }

    pub fn matches(&self, token: &str) -> bool {
        digest_matches(&self.token_digest, token)
    }
}

#[derive(Debug, Clone)]
pub struct PasswordReset {
    pub id: Uuid,
    pub user_id: UserId,
    pub email: Email,
    pub token_digest: String,
    pub expire_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

impl PasswordReset {
    pub fn new(user_id: UserId, email: Email, token: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            email,
            token_digest: token_digest(token),
            expire_at: now + Duration::minutes(PASSWORD_RESET_TTL_MINUTES),
            created_at: now,
        }
    }

    pub fn matches(&self, token: &str) -> bool {
        digest_matches(&self.token_digest, token)
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expire_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> Email {
        Email::new("reader@example.com").unwrap()
    }

    #[test]
    fn test_only_the_issued_token_matches() {
        let record = EmailVerification::new(UserId::new(), email(), "abc");
        assert!(record.matches("abc"));
        assert!(!record.matches("abd"));
        assert!(!record.matches(""));
        assert_ne!(record.token_digest, "abc");
    }

    #[test]
    fn test_reset_expires_after_five_minutes() {
        let reset = PasswordReset::new(UserId::new(), email(), "t");
        assert!(!reset.is_expired(reset.created_at + Duration::minutes(4)));
        assert!(!reset.is_expired(reset.expire_at));
        assert!(reset.is_expired(reset.expire_at + Duration::seconds(1)));
        assert!(reset.is_expired(reset.created_at + Duration::hours(1)));
    }
}
