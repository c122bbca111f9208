//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::{
    one_time_token::{EmailVerification, PasswordReset},
    refresh_token::RefreshToken,
    role::Role,
    user::User,
};
use crate::domain::repository::{
    EmailVerificationRepository, PasswordResetRepository, RefreshTokenRepository, RoleRepository,
    UserRepository,
};
use crate::domain::value_object::{
    email::Email,
    full_name::FullName,
    profile::{Bio, Gender},
    user_password::UserPassword,
    user_role::UserRole,
    username::Username,
};
use crate::error::{AuthError, AuthResult};

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_USER: &str = r#"
    SELECT
        u.id,
        u.username,
        u.name,
        u.email,
        u.password_hash,
        u.avatar,
        u.bio,
        u.gender,
        r.name AS role,
        u.is_verified,
        u.is_blocked,
        u.created_at,
        u.updated_at
    FROM users u
    JOIN roles r ON r.id = u.role_id
"#;

fn uuids(ids: &[UserId]) -> Vec<Uuid> {
    ids.iter().map(|id| *id.as_uuid()).collect()
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn insert_user(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, username, name, email, password_hash, avatar, bio, gender,
                role_id, is_verified, is_blocked, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8,
                (SELECT id FROM roles WHERE name = $9),
                $10, $11, $12, $13
            )
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.username.as_str())
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(user.password.as_phc_string())
        .bind(&user.avatar)
        .bind(user.bio.as_str())
        .bind(user.gender.to_string())
        .bind(user.role.code())
        .bind(user.is_verified)
        .bind(user.is_blocked)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_user(&self, id: &UserId) -> AuthResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE u.id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE u.email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_user_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        let sql = format!("{SELECT_USER} WHERE u.username = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(username.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn user_exists(&self, email: &Email, username: &Username) -> AuthResult<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM users WHERE email = $1 OR username = $2)",
        )
        .bind(email.as_str())
        .bind(username.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_users(&self) -> AuthResult<Vec<User>> {
        let sql = format!("{SELECT_USER} ORDER BY u.created_at DESC");
        let rows = sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(UserRow::into_user).collect()
    }

    async fn update_user(&self, user: &User) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE users SET
                name = $2,
                password_hash = $3,
                avatar = $4,
                bio = $5,
                gender = $6,
                role_id = (SELECT id FROM roles WHERE name = $7),
                is_verified = $8,
                is_blocked = $9,
                updated_at = $10
            WHERE id = $1
            "#,
        )
        .bind(user.id.as_uuid())
        .bind(user.name.as_str())
        .bind(user.password.as_phc_string())
        .bind(&user.avatar)
        .bind(user.bio.as_str())
        .bind(user.gender.to_string())
        .bind(user.role.code())
        .bind(user.is_verified)
        .bind(user.is_blocked)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn set_blocked(&self, ids: &[UserId], blocked: bool) -> AuthResult<u64> {
        let changed = sqlx::query(
            "UPDATE users SET is_blocked = $2, updated_at = now() WHERE id = ANY($1)",
        )
        .bind(uuids(ids))
        .bind(blocked)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(changed)
    }

    async fn set_role(&self, ids: &[UserId], role: UserRole) -> AuthResult<u64> {
        let changed = sqlx::query(
            r#"
            UPDATE users
            SET role_id = (SELECT id FROM roles WHERE name = $2), updated_at = now()
            WHERE id = ANY($1)
            "#,
        )
        .bind(uuids(ids))
        .bind(role.code())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(changed)
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for PgAuthRepository {
    async fn list_roles(&self) -> AuthResult<Vec<Role>> {
        let rows = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, created_at FROM roles ORDER BY created_at, name",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(RoleRow::into_role).collect()
    }

    async fn find_role(&self, name: UserRole) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, created_at FROM roles WHERE name = $1",
        )
        .bind(name.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RoleRow::into_role).transpose()
    }

    async fn insert_role(&self, role: &Role) -> AuthResult<()> {
        sqlx::query("INSERT INTO roles (id, name, created_at) VALUES ($1, $2, $3)")
            .bind(role.id)
            .bind(role.name.code())
            .bind(role.created_at)
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

// ============================================================================
// Refresh Token Repository Implementation
// ============================================================================

impl RefreshTokenRepository for PgAuthRepository {
    async fn store_refresh_token(&self, token: &RefreshToken) -> AuthResult<()> {
        sqlx::query(
            "INSERT INTO refresh_tokens (id, user_id, token_digest, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(token.id)
        .bind(token.user_id.as_uuid())
        .bind(&token.token_digest)
        .bind(token.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_refresh_token(&self, digest: &str) -> AuthResult<Option<RefreshToken>> {
        let row = sqlx::query_as::<_, RefreshTokenRow>(
            "SELECT id, user_id, token_digest, created_at FROM refresh_tokens WHERE token_digest = $1",
        )
        .bind(digest)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RefreshTokenRow::into_token))
    }

    async fn revoke_refresh_token(&self, digest: &str) -> AuthResult<bool> {
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE token_digest = $1")
            .bind(digest)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }

    async fn revoke_all_refresh_tokens(&self, user_id: &UserId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn rotate_refresh_token(&self, old_digest: &str, new: &RefreshToken) -> AuthResult<bool> {
        let mut tx = self.pool.begin().await?;

        let deleted = sqlx::query("DELETE FROM refresh_tokens WHERE token_digest = $1")
            .bind(old_digest)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if deleted == 0 {
            tx.rollback().await?;
            return Ok(false);
        }

        sqlx::query(
            "INSERT INTO refresh_tokens (id, user_id, token_digest, created_at) VALUES ($1, $2, $3, $4)",
        )
        .bind(new.id)
        .bind(new.user_id.as_uuid())
        .bind(&new.token_digest)
        .bind(new.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}

// ============================================================================
// Email Verification Repository Implementation
// ============================================================================

impl EmailVerificationRepository for PgAuthRepository {
    async fn store_verification(&self, record: &EmailVerification) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO email_verifications (id, user_id, email, token_digest, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.id)
        .bind(record.user_id.as_uuid())
        .bind(record.email.as_str())
        .bind(&record.token_digest)
        .bind(record.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn latest_verification(&self, email: &Email) -> AuthResult<Option<EmailVerification>> {
        let row = sqlx::query_as::<_, EmailVerificationRow>(
            r#"
            SELECT id, user_id, email, token_digest, created_at
            FROM email_verifications
            WHERE email = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(EmailVerificationRow::into_record))
    }

    async fn complete_verification(&self, record: &EmailVerification) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE users SET is_verified = true, updated_at = now() WHERE id = $1")
            .bind(record.user_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM email_verifications WHERE email = $1")
            .bind(record.email.as_str())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}

// ============================================================================
// Password Reset Repository Implementation
// ============================================================================

impl PasswordResetRepository for PgAuthRepository {
    async fn replace_password_reset(&self, record: &PasswordReset) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        let superseded = sqlx::query("DELETE FROM password_resets WHERE email = $1")
            .bind(record.email.as_str())
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query(
            r#"
            INSERT INTO password_resets (id, user_id, email, token_digest, expire_at, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(record.id)
        .bind(record.user_id.as_uuid())
        .bind(record.email.as_str())
        .bind(&record.token_digest)
        .bind(record.expire_at)
        .bind(record.created_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        if superseded > 0 {
            tracing::debug!(superseded, "Superseded earlier password resets");
        }
        Ok(())
    }

    async fn find_password_reset(&self, email: &Email) -> AuthResult<Option<PasswordReset>> {
        let row = sqlx::query_as::<_, PasswordResetRow>(
            r#"
            SELECT id, user_id, email, token_digest, expire_at, created_at
            FROM password_resets
            WHERE email = $1
            ORDER BY created_at DESC
            LIMIT 1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(PasswordResetRow::into_record))
    }

    async fn delete_password_reset(&self, record: &PasswordReset) -> AuthResult<()> {
        sqlx::query("DELETE FROM password_resets WHERE id = $1")
            .bind(record.id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn complete_password_reset(
        &self,
        record: &PasswordReset,
        password: &UserPassword,
    ) -> AuthResult<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE users SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(record.user_id.as_uuid())
            .bind(password.as_phc_string())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM password_resets WHERE email = $1")
            .bind(record.email.as_str())
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM refresh_tokens WHERE user_id = $1")
            .bind(record.user_id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn purge_expired_password_resets(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM password_resets WHERE expire_at < now()")
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    name: String,
    email: String,
    password_hash: String,
    avatar: String,
    bio: String,
    gender: String,
    role: String,
    is_verified: bool,
    is_blocked: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let role = UserRole::from_code(&self.role)
            .map_err(|e| AuthError::Internal(format!("Invalid role in database: {e}")))?;
        let gender = self
            .gender
            .parse::<Gender>()
            .map_err(|_| AuthError::Internal(format!("Invalid gender in database: {}", self.gender)))?;

        Ok(User {
            id: UserId::from_uuid(self.id),
            username: Username::from_db(self.username),
            name: FullName::from_db(self.name),
            email: Email::from_db(self.email),
            password: UserPassword::from_phc_string(self.password_hash)?,
            avatar: self.avatar,
            bio: Bio::from_db(self.bio),
            gender,
            role,
            is_verified: self.is_verified,
            is_blocked: self.is_blocked,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: Uuid,
    name: String,
    created_at: DateTime<Utc>,
}

impl RoleRow {
    fn into_role(self) -> AuthResult<Role> {
        Ok(Role {
            id: self.id,
            name: UserRole::from_code(&self.name)
                .map_err(|e| AuthError::Internal(format!("Invalid role in database: {e}")))?,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RefreshTokenRow {
    id: Uuid,
    user_id: Uuid,
    token_digest: String,
    created_at: DateTime<Utc>,
}

impl RefreshTokenRow {
    fn into_token(self) -> RefreshToken {
        RefreshToken {
            id: self.id,
            user_id: UserId::from_uuid(self.user_id),
            token_digest: self.token_digest,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct EmailVerificationRow {
    id: Uuid,
    user_id: Uuid,
    email: String,
    token_digest: String,
    created_at: DateTime<Utc>,
}

impl EmailVerificationRow {
    fn into_record(self) -> EmailVerification {
        EmailVerification {
            id: self.id,
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            token_digest: self.token_digest,
            created_at: self.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PasswordResetRow {
    id: Uuid,
    user_id: Uuid,
    email: String,
    token_digest: String,
    expire_at: DateTime<Utc>,
    created_at: DateTime<Utc>,
}

impl PasswordResetRow {
    fn into_record(self) -> PasswordReset {
        PasswordReset {
            id: self.id,
            user_id: UserId::from_uuid(self.user_id),
            email: Email::from_db(self.email),
            token_digest: self.token_digest,
            expire_at: self.expire_at,
            created_at: self.created_at,
        }
    }
}
