//! User Entity
//!
//! Account, profile and moderation flags. The password hash lives here but is
//! never serialized; DTOs copy the public fields explicitly.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    profile::{Bio, Gender},
    user_password::UserPassword,
    user_role::UserRole,
    username::Username,
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub name: FullName,
    pub email: Email,
    pub password: UserPassword,
    /// Public URL, empty when unset
    pub avatar: String,
    pub bio: Bio,
    pub gender: Gender,
    pub role: UserRole,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh, unverified account with default profile fields
    pub fn new(
        username: Username,
        name: FullName,
        email: Email,
        password: UserPassword,
        role: UserRole,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            name,
            email,
            password,
            avatar: String::new(),
            bio: Bio::default(),
            gender: Gender::default(),
            role,
            is_verified: false,
            is_blocked: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Login gate, checked after the email lookup and before the password
    pub fn ensure_can_login(&self) -> AuthResult<()> {
        if !self.is_verified {
            return Err(AuthError::NotVerified);
        }
        if self.is_blocked {
            return Err(AuthError::Blocked);
        }
        Ok(())
    }

    pub fn mark_verified(&mut self) {
        self.is_verified = true;
        self.updated_at = Utc::now();
    }

    pub fn set_password(&mut self, password: UserPassword) {
        self.password = password;
        self.updated_at = Utc::now();
    }

    pub fn set_avatar(&mut self, url: String) {
        self.avatar = url;
        self.updated_at = Utc::now();
    }

    pub fn update_profile(&mut self, name: Option<FullName>, bio: Option<Bio>, gender: Option<Gender>) {
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(bio) = bio {
            self.bio = bio;
        }
        if let Some(gender) = gender {
            self.gender = gender;
        }
        self.updated_at = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;

    fn user() -> User {
        let raw = RawPassword::new("Lua-Gao-9x".to_string()).unwrap();
        User::new(
            Username::new("nongdan").unwrap(),
            FullName::new("nong dan").unwrap(),
            Email::new("nongdan@example.com").unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
            UserRole::User,
        )
    }

    #[test]
    fn test_new_user_defaults() {
        let user = user();
        assert!(!user.is_verified);
        assert!(!user.is_blocked);
        assert_eq!(user.bio.as_str(), "Ẩn danh");
        assert_eq!(user.gender, Gender::Other);
        assert!(user.avatar.is_empty());
    }

    #[test]
    fn test_login_gate_order() {
        let mut user = user();
        user.is_blocked = true;
        // Unverified is reported before blocked
        assert!(matches!(user.ensure_can_login(), Err(AuthError::NotVerified)));

        user.mark_verified();
        assert!(matches!(user.ensure_can_login(), Err(AuthError::Blocked)));

        user.is_blocked = false;
        assert!(user.ensure_can_login().is_ok());
    }

    #[test]
    fn test_partial_profile_update() {
        let mut user = user();
        user.update_profile(None, None, Some(Gender::Female));
        assert_eq!(user.name.as_str(), "Nong Dan");
        assert_eq!(user.gender, Gender::Female);
    }
}
