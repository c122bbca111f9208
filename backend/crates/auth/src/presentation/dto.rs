//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entity::{role::Role, user::User};

// ============================================================================
// Register / Login
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}

// ============================================================================
// Verification / Password reset
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct ForgetPasswordRequest {
    pub email: String,
}

/// `?email=..&token=..` carried by mailed links
#[derive(Debug, Clone, Deserialize)]
pub struct TokenQuery {
    pub email: String,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub password: String,
}

// ============================================================================
// Users
// ============================================================================

/// Full account view; never carries the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub bio: String,
    pub gender: String,
    pub role: String,
    pub is_verified: bool,
    pub is_blocked: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.to_string(),
            name: user.name.to_string(),
            email: user.email.to_string(),
            avatar: user.avatar.clone(),
            bio: user.bio.as_str().to_string(),
            gender: user.gender.to_string(),
            role: user.role.to_string(),
            is_verified: user.is_verified,
            is_blocked: user.is_blocked,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// What anyone may see about a user
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUserResponse {
    pub id: UserId,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub bio: String,
    pub gender: String,
}

impl From<&User> for PublicUserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.to_string(),
            name: user.name.to_string(),
            avatar: user.avatar.clone(),
            bio: user.bio.as_str().to_string(),
            gender: user.gender.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct UserPayload<T> {
    pub user: T,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsersPayload {
    pub users: Vec<UserResponse>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub bio: Option<String>,
    pub gender: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoleChangeRequest {
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChangeRolesRequest {
    pub ids: Vec<UserId>,
    pub role: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockUsersRequest {
    pub ids: Vec<UserId>,
    pub is_blocked: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedPayload {
    pub modified_count: u64,
}

// ============================================================================
// Roles
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleResponse {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl From<&Role> for RoleResponse {
    fn from(role: &Role) -> Self {
        Self {
            id: role.id,
            name: role.name.to_string(),
            created_at: role.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RolePayload {
    pub role: RoleResponse,
}

#[derive(Debug, Clone, Serialize)]
pub struct RolesPayload {
    pub roles: Vec<RoleResponse>,
}
