//! User Management Use Case
//!
//! Admin operations on accounts plus the public profile lookups.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::{RefreshTokenRepository, RoleRepository, UserRepository};
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
    username::Username,
};
use crate::error::{AuthError, AuthResult, is_unique_violation};

pub struct CreateUserInput {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

pub struct UserManagementUseCase<U, R, S>
where
    U: UserRepository,
    R: RoleRepository,
    S: RefreshTokenRepository,
{
    user_repo: Arc<U>,
    role_repo: Arc<R>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, R, S> UserManagementUseCase<U, R, S>
where
    U: UserRepository,
    R: RoleRepository,
    S: RefreshTokenRepository,
{
    pub fn new(
        user_repo: Arc<U>,
        role_repo: Arc<R>,
        session_repo: Arc<S>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            user_repo,
            role_repo,
            session_repo,
            config,
        }
    }

    pub async fn list(&self) -> AuthResult<Vec<User>> {
        self.user_repo.list_users().await
    }

    /// Admin-created accounts skip email verification
    pub async fn create(&self, input: CreateUserInput) -> AuthResult<User> {
        let role = self.registered_role(&input.role).await?;
        let name = FullName::new(&input.name)?;
        let email = Email::new(&input.email)?;
        let username =
            Username::new(&input.username).map_err(|e| AuthError::Validation(e.to_string()))?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.user_exists(&email, &username).await? {
            return Err(AuthError::UserExists);
        }

        let password = UserPassword::from_raw(&raw_password, self.config.pepper())?;
        let mut user = User::new(username, name, email, password, role);
        user.mark_verified();

        self.user_repo.insert_user(&user).await.map_err(|e| {
            if is_unique_violation(&e) {
                AuthError::UserExists
            } else {
                e
            }
        })?;

        tracing::info!(user_id = %user.id, role = %role, "User created by admin");
        Ok(user)
    }

    pub async fn find(&self, id: &UserId) -> AuthResult<User> {
        self.user_repo
            .find_user(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn find_by_username(&self, username: &str) -> AuthResult<User> {
        let username = Username::new(username).map_err(|_| AuthError::UserNotFound)?;
        self.user_repo
            .find_user_by_username(&username)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    /// Blocking also ends every session of the user
    pub async fn set_blocked(&self, actor: UserId, target: UserId, blocked: bool) -> AuthResult<()> {
        self.set_blocked_many(actor, &[target], blocked).await?;
        Ok(())
    }

    pub async fn set_blocked_many(
        &self,
        actor: UserId,
        targets: &[UserId],
        blocked: bool,
    ) -> AuthResult<u64> {
        if blocked && targets.contains(&actor) {
            return Err(AuthError::CannotBlockSelf);
        }

        let changed = self.user_repo.set_blocked(targets, blocked).await?;
        if changed == 0 {
            return Err(AuthError::UserNotFound);
        }

        if blocked {
            for target in targets {
                self.session_repo.revoke_all_refresh_tokens(target).await?;
            }
        }

        tracing::info!(actor = %actor, changed, blocked, "Block state changed");
        Ok(changed)
    }

    /// Ends the targets' sessions so the next login carries the new role
    pub async fn change_role(&self, targets: &[UserId], role: &str) -> AuthResult<u64> {
        let role = self.registered_role(role).await?;

        let changed = self.user_repo.set_role(targets, role).await?;
        if changed == 0 {
            return Err(AuthError::UserNotFound);
        }

        // Refresh tokens carry the role they were issued with
        for target in targets {
            self.session_repo.revoke_all_refresh_tokens(target).await?;
        }

        tracing::info!(changed, role = %role, "Role changed");
        Ok(changed)
    }

    /// Parse a role name and make sure the registry has it
    async fn registered_role(&self, name: &str) -> AuthResult<UserRole> {
        let role = UserRole::from_code(name).map_err(|e| AuthError::UnknownRole(e.0))?;
        if self.role_repo.find_role(role).await?.is_none() {
            return Err(AuthError::UnknownRole(role.to_string()));
        }
        Ok(role)
    }
}
