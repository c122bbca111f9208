//! First admin account
//!
//! Roles can only be granted by an admin, so a fresh database needs one
//! seeded from the environment (`ADMIN_EMAIL`, `ADMIN_USERNAME`,
//! `ADMIN_PASSWORD`, optional `ADMIN_NAME`).

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
    username::Username,
};
use crate::error::{AuthError, AuthResult};

pub struct AdminSeed {
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: String,
}

impl AdminSeed {
    /// `None` unless all three required variables are set
    pub fn from_env() -> Option<Self> {
        Some(Self {
            email: std::env::var("ADMIN_EMAIL").ok()?,
            username: std::env::var("ADMIN_USERNAME").ok()?,
            password: std::env::var("ADMIN_PASSWORD").ok()?,
            name: std::env::var("ADMIN_NAME").unwrap_or_else(|_| "Administrator".to_string()),
        })
    }
}

/// Create the admin unless the email or username already exists
///
/// Returns true if an account was created.
pub async fn ensure_admin<U>(user_repo: Arc<U>, config: &AuthConfig, seed: AdminSeed) -> AuthResult<bool>
where
    U: UserRepository,
{
    let email = Email::new(&seed.email)?;
    let username =
        Username::new(&seed.username).map_err(|e| AuthError::Validation(e.to_string()))?;

    if user_repo.user_exists(&email, &username).await? {
        return Ok(false);
    }

    let raw_password = RawPassword::new(seed.password)?;
    let password = UserPassword::from_raw(&raw_password, config.pepper())?;
    let mut admin = User::new(username, FullName::new(&seed.name)?, email, password, UserRole::Admin);
    admin.mark_verified();

    user_repo.insert_user(&admin).await?;
    tracing::info!(user_id = %admin.id, "Seeded admin account");
    Ok(true)
}
