//! Role Registry Use Case

use std::sync::Arc;

use crate::domain::entity::role::Role;
use crate::domain::repository::RoleRepository;
use crate::domain::value_object::user_role::UserRole;
use crate::error::{AuthError, AuthResult};

pub struct RoleUseCase<R>
where
    R: RoleRepository,
{
    role_repo: Arc<R>,
}

impl<R> RoleUseCase<R>
where
    R: RoleRepository,
{
    pub fn new(role_repo: Arc<R>) -> Self {
        Self { role_repo }
    }

    pub async fn list(&self) -> AuthResult<Vec<Role>> {
        self.role_repo.list_roles().await
    }

    /// Register a known role that is missing from the table
    pub async fn create(&self, name: &str) -> AuthResult<Role> {
        let name = UserRole::from_code(name).map_err(|e| AuthError::UnknownRole(e.0))?;
        if self.role_repo.find_role(name).await?.is_some() {
            return Err(AuthError::RoleExists);
        }

        let role = Role::new(name);
        self.role_repo.insert_role(&role).await?;

        tracing::info!(role = %name, "Role registered");
        Ok(role)
    }
}
