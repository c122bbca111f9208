//! Profile Use Case
//!
//! Operations a signed-in user performs on their own account.

use std::sync::Arc;

use kernel::id::UserId;
use platform::media::{MediaStore, Upload, discard};

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    full_name::FullName,
    profile::{Bio, Gender},
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub gender: Option<String>,
}

pub struct ProfileUseCase<U, M>
where
    U: UserRepository,
    M: MediaStore + Sync,
{
    user_repo: Arc<U>,
    media: Arc<M>,
    config: Arc<AuthConfig>,
}

impl<U, M> ProfileUseCase<U, M>
where
    U: UserRepository,
    M: MediaStore + Sync,
{
    pub fn new(user_repo: Arc<U>, media: Arc<M>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            media,
            config,
        }
    }

    pub async fn me(&self, actor: UserId) -> AuthResult<User> {
        self.load(actor).await
    }

    /// Full account view; only the owner may read it
    pub async fn get(&self, actor: UserId, id: UserId) -> AuthResult<User> {
        Self::ensure_self(actor, id)?;
        self.load(id).await
    }

    pub async fn update(&self, actor: UserId, id: UserId, changes: ProfileChanges) -> AuthResult<User> {
        Self::ensure_self(actor, id)?;

        let name = changes.name.map(FullName::new).transpose()?;
        let bio = changes.bio.map(Bio::new).transpose()?;
        let gender = changes
            .gender
            .map(|g| g.parse::<Gender>())
            .transpose()?;

        let mut user = self.load(id).await?;
        user.update_profile(name, bio, gender);
        self.user_repo.update_user(&user).await?;

        tracing::debug!(user_id = %id, "Profile updated");
        Ok(user)
    }

    /// Store the new image, then drop the previous one
    pub async fn update_avatar(&self, actor: UserId, id: UserId, upload: Upload) -> AuthResult<User> {
        Self::ensure_self(actor, id)?;
        let mut user = self.load(id).await?;

        let stored = self.media.save(upload).await?;
        let previous = user.avatar.clone();
        user.set_avatar(stored.url);

        if let Err(e) = self.user_repo.update_user(&user).await {
            discard(self.media.as_ref(), &user.avatar).await;
            return Err(e);
        }
        if !previous.is_empty() {
            discard(self.media.as_ref(), &previous).await;
        }

        Ok(user)
    }

    pub async fn change_password(
        &self,
        actor: UserId,
        old_password: String,
        new_password: String,
    ) -> AuthResult<()> {
        let mut user = self.load(actor).await?;

        let old = RawPassword::for_verification(old_password);
        if !user.password.verify(&old, self.config.pepper()) {
            return Err(AuthError::IncorrectOldPassword);
        }

        let new = RawPassword::new(new_password).map_err(|_| AuthError::InvalidNewPassword)?;
        user.set_password(UserPassword::from_raw(&new, self.config.pepper())?);
        self.user_repo.update_user(&user).await?;

        tracing::info!(user_id = %actor, "Password changed");
        Ok(())
    }

    fn ensure_self(actor: UserId, id: UserId) -> AuthResult<()> {
        if actor == id {
            Ok(())
        } else {
            Err(AuthError::NotAllowed)
        }
    }

    async fn load(&self, id: UserId) -> AuthResult<User> {
        self.user_repo
            .find_user(&id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }
}
