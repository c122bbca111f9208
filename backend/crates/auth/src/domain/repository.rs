//! Repository Traits
//!
//! Persistence seams of the auth domain. Methods that touch several rows at
//! once are atomic in every implementation.

use kernel::id::UserId;

use crate::domain::entity::{
    one_time_token::{EmailVerification, PasswordReset},
    refresh_token::RefreshToken,
    role::Role,
    user::User,
};
use crate::domain::value_object::{
    email::Email, user_password::UserPassword, user_role::UserRole, username::Username,
};
use crate::error::AuthResult;

/// Credential store
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn insert_user(&self, user: &User) -> AuthResult<()>;

    async fn find_user(&self, id: &UserId) -> AuthResult<Option<User>>;

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn find_user_by_username(&self, username: &Username) -> AuthResult<Option<User>>;

    /// True if either the email or the username is taken
    async fn user_exists(&self, email: &Email, username: &Username) -> AuthResult<bool>;

    /// Newest first
    async fn list_users(&self) -> AuthResult<Vec<User>>;

    /// Persist profile, avatar, password and flags
    async fn update_user(&self, user: &User) -> AuthResult<()>;

    /// Returns the number of users changed
    async fn set_blocked(&self, ids: &[UserId], blocked: bool) -> AuthResult<u64>;

    /// Returns the number of users changed
    async fn set_role(&self, ids: &[UserId], role: UserRole) -> AuthResult<u64>;
}

/// Role registry
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    async fn list_roles(&self) -> AuthResult<Vec<Role>>;

    async fn find_role(&self, name: UserRole) -> AuthResult<Option<Role>>;

    async fn insert_role(&self, role: &Role) -> AuthResult<()>;
}

/// Session store
#[trait_variant::make(RefreshTokenRepository: Send)]
pub trait LocalRefreshTokenRepository {
    async fn store_refresh_token(&self, token: &RefreshToken) -> AuthResult<()>;

    async fn find_refresh_token(&self, digest: &str) -> AuthResult<Option<RefreshToken>>;

    /// Returns false if the token was not stored
    async fn revoke_refresh_token(&self, digest: &str) -> AuthResult<bool>;

    async fn revoke_all_refresh_tokens(&self, user_id: &UserId) -> AuthResult<u64>;

    /// Replace `old_digest` with `new` in one transaction
    ///
    /// Returns false, inserting nothing, if `old_digest` was already gone.
    async fn rotate_refresh_token(&self, old_digest: &str, new: &RefreshToken) -> AuthResult<bool>;
}

#[trait_variant::make(EmailVerificationRepository: Send)]
pub trait LocalEmailVerificationRepository {
    async fn store_verification(&self, record: &EmailVerification) -> AuthResult<()>;

    /// Newest record for the address
    async fn latest_verification(&self, email: &Email) -> AuthResult<Option<EmailVerification>>;

    /// Mark the user verified and delete every record for the address
    async fn complete_verification(&self, record: &EmailVerification) -> AuthResult<()>;
}

#[trait_variant::make(PasswordResetRepository: Send)]
pub trait LocalPasswordResetRepository {
    /// Delete every reset for the address and store `record`, atomically
    async fn replace_password_reset(&self, record: &PasswordReset) -> AuthResult<()>;

    async fn find_password_reset(&self, email: &Email) -> AuthResult<Option<PasswordReset>>;

    async fn delete_password_reset(&self, record: &PasswordReset) -> AuthResult<()>;

    /// Set the new hash, delete the reset and revoke the user's refresh tokens
    async fn complete_password_reset(
        &self,
        record: &PasswordReset,
        password: &UserPassword,
    ) -> AuthResult<()>;

    /// Startup housekeeping; returns the number of rows removed
    async fn purge_expired_password_resets(&self) -> AuthResult<u64>;
}

/// Everything the auth HTTP layer needs from one store
pub trait AuthStore:
    UserRepository
    + RoleRepository
    + RefreshTokenRepository
    + EmailVerificationRepository
    + PasswordResetRepository
    + Clone
    + Send
    + Sync
    + 'static
{
}

impl<T> AuthStore for T where
    T: UserRepository
        + RoleRepository
        + RefreshTokenRepository
        + EmailVerificationRepository
        + PasswordResetRepository
        + Clone
        + Send
        + Sync
        + 'static
{
}
