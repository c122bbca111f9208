//! Use-case and router tests over an in-memory store

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, Utc};
use kernel::id::UserId;
use platform::mail::{MailError, MailSender, OutgoingMail};
use platform::media::{DiskMediaStore, MediaConfig};
use tower::ServiceExt;

use crate::application::{
    AuthConfig, CreateUserInput, LoginInput, LoginOutput, LoginUseCase, PasswordResetUseCase,
    RefreshUseCase, RegisterInput, RegisterUseCase, RoleUseCase, TokenError, TokenIssuer,
    UserManagementUseCase, VerifyEmailUseCase,
};
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
    user_password::{RawPassword, UserPassword},
    user_role::UserRole,
    username::Username,
};
use crate::error::{AuthError, AuthResult};
use crate::presentation::handlers::AuthAppState;
use crate::presentation::router::users_router;

const PASSWORD: &str = "Passw0rd!";

// ============================================================================
// In-memory doubles
// ============================================================================

#[derive(Default)]
struct State {
    users: Vec<User>,
    roles: Vec<Role>,
    refresh_tokens: Vec<RefreshToken>,
    verifications: Vec<EmailVerification>,
    resets: Vec<PasswordReset>,
}

#[derive(Clone)]
struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    fn new() -> Self {
        let state = State {
            roles: UserRole::ALL.into_iter().map(Role::new).collect(),
            ..Default::default()
        };
        Self {
            state: Arc::new(Mutex::new(state)),
        }
    }

    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    fn expire_resets(&self) {
        self.with(|s| {
            for reset in &mut s.resets {
                reset.expire_at = Utc::now() - Duration::seconds(1);
            }
        });
    }
}

impl UserRepository for MemoryStore {
    async fn insert_user(&self, user: &User) -> AuthResult<()> {
        self.with(|s| s.users.push(user.clone()));
        Ok(())
    }

    async fn find_user(&self, id: &UserId) -> AuthResult<Option<User>> {
        Ok(self.with(|s| s.users.iter().find(|u| u.id == *id).cloned()))
    }

    async fn find_user_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self.with(|s| s.users.iter().find(|u| u.email == *email).cloned()))
    }

    async fn find_user_by_username(&self, username: &Username) -> AuthResult<Option<User>> {
        Ok(self.with(|s| s.users.iter().find(|u| u.username == *username).cloned()))
    }

    async fn user_exists(&self, email: &Email, username: &Username) -> AuthResult<bool> {
        Ok(self.with(|s| {
            s.users
                .iter()
                .any(|u| u.email == *email || u.username == *username)
        }))
    }

    async fn list_users(&self) -> AuthResult<Vec<User>> {
        Ok(self.with(|s| s.users.iter().rev().cloned().collect()))
    }

    async fn update_user(&self, user: &User) -> AuthResult<()> {
        self.with(|s| {
            if let Some(existing) = s.users.iter_mut().find(|u| u.id == user.id) {
                *existing = user.clone();
            }
        });
        Ok(())
    }

    async fn set_blocked(&self, ids: &[UserId], blocked: bool) -> AuthResult<u64> {
        Ok(self.with(|s| {
            let mut changed = 0;
            for user in s.users.iter_mut().filter(|u| ids.contains(&u.id)) {
                user.is_blocked = blocked;
                changed += 1;
            }
            changed
        }))
    }

    async fn set_role(&self, ids: &[UserId], role: UserRole) -> AuthResult<u64> {
        Ok(self.with(|s| {
            let mut changed = 0;
            for user in s.users.iter_mut().filter(|u| ids.contains(&u.id)) {
                user.role = role;
                changed += 1;
            }
            changed
        }))
    }
}

impl RoleRepository for MemoryStore {
    async fn list_roles(&self) -> AuthResult<Vec<Role>> {
        Ok(self.with(|s| s.roles.clone()))
    }

    async fn find_role(&self, name: UserRole) -> AuthResult<Option<Role>> {
        Ok(self.with(|s| s.roles.iter().find(|r| r.name == name).cloned()))
    }

    async fn insert_role(&self, role: &Role) -> AuthResult<()> {
        self.with(|s| s.roles.push(role.clone()));
        Ok(())
    }
}

impl RefreshTokenRepository for MemoryStore {
    async fn store_refresh_token(&self, token: &RefreshToken) -> AuthResult<()> {
        self.with(|s| s.refresh_tokens.push(token.clone()));
        Ok(())
    }

    async fn find_refresh_token(&self, digest: &str) -> AuthResult<Option<RefreshToken>> {
        Ok(self.with(|s| {
            s.refresh_tokens
                .iter()
                .find(|t| t.token_digest == digest)
                .cloned()
        }))
    }

    async fn revoke_refresh_token(&self, digest: &str) -> AuthResult<bool> {
        Ok(self.with(|s| {
            let before = s.refresh_tokens.len();
            s.refresh_tokens.retain(|t| t.token_digest != digest);
            s.refresh_tokens.len() < before
        }))
    }

    async fn revoke_all_refresh_tokens(&self, user_id: &UserId) -> AuthResult<u64> {
        Ok(self.with(|s| {
            let before = s.refresh_tokens.len();
            s.refresh_tokens.retain(|t| t.user_id != *user_id);
            (before - s.refresh_tokens.len()) as u64
        }))
    }

    async fn rotate_refresh_token(&self, old_digest: &str, new: &RefreshToken) -> AuthResult<bool> {
        Ok(self.with(|s| {
            let before = s.refresh_tokens.len();
            s.refresh_tokens.retain(|t| t.token_digest != old_digest);
            if s.refresh_tokens.len() == before {
                return false;
            }
            s.refresh_tokens.push(new.clone());
            true
        }))
    }
}

impl EmailVerificationRepository for MemoryStore {
    async fn store_verification(&self, record: &EmailVerification) -> AuthResult<()> {
        self.with(|s| s.verifications.push(record.clone()));
        Ok(())
    }

    async fn latest_verification(&self, email: &Email) -> AuthResult<Option<EmailVerification>> {
        Ok(self.with(|s| {
            s.verifications
                .iter()
                .rev()
                .find(|v| v.email == *email)
                .cloned()
        }))
    }

    async fn complete_verification(&self, record: &EmailVerification) -> AuthResult<()> {
        self.with(|s| {
            if let Some(user) = s.users.iter_mut().find(|u| u.id == record.user_id) {
                user.is_verified = true;
            }
            s.verifications.retain(|v| v.email != record.email);
        });
        Ok(())
    }
}

impl PasswordResetRepository for MemoryStore {
    async fn replace_password_reset(&self, record: &PasswordReset) -> AuthResult<()> {
        self.with(|s| {
            s.resets.retain(|r| r.email != record.email);
            s.resets.push(record.clone());
        });
        Ok(())
    }

    async fn find_password_reset(&self, email: &Email) -> AuthResult<Option<PasswordReset>> {
        Ok(self.with(|s| s.resets.iter().find(|r| r.email == *email).cloned()))
    }

    async fn delete_password_reset(&self, record: &PasswordReset) -> AuthResult<()> {
        self.with(|s| s.resets.retain(|r| r.id != record.id));
        Ok(())
    }

    async fn complete_password_reset(
        &self,
        record: &PasswordReset,
        password: &UserPassword,
    ) -> AuthResult<()> {
        self.with(|s| {
            if let Some(user) = s.users.iter_mut().find(|u| u.id == record.user_id) {
                user.password = password.clone();
            }
            s.resets.retain(|r| r.email != record.email);
            s.refresh_tokens.retain(|t| t.user_id != record.user_id);
        });
        Ok(())
    }

    async fn purge_expired_password_resets(&self) -> AuthResult<u64> {
        let now = Utc::now();
        Ok(self.with(|s| {
            let before = s.resets.len();
            s.resets.retain(|r| !r.is_expired(now));
            (before - s.resets.len()) as u64
        }))
    }
}

/// Keeps every mail so tests can follow the links
#[derive(Clone, Default)]
struct RecordingMailer {
    sent: Arc<Mutex<Vec<OutgoingMail>>>,
}

impl RecordingMailer {
    /// Token of the newest mail, waiting for the detached send task
    async fn last_token(&self) -> String {
        for _ in 0..50 {
            let token = self.sent.lock().unwrap().last().and_then(|mail| {
                let (_, rest) = mail.html.split_once("token=")?;
                rest.split('"').next().map(str::to_string)
            });
            if let Some(token) = token {
                return token;
            }
            tokio::task::yield_now().await;
        }
        panic!("no mail was sent");
    }

    async fn sent_count(&self, expected: usize) -> usize {
        for _ in 0..50 {
            if self.sent.lock().unwrap().len() >= expected {
                break;
            }
            tokio::task::yield_now().await;
        }
        self.sent.lock().unwrap().len()
    }
}

impl MailSender for RecordingMailer {
    async fn send(&self, mail: OutgoingMail) -> Result<(), MailError> {
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}

// ============================================================================
// Fixtures
// ============================================================================

struct Fixture {
    store: Arc<MemoryStore>,
    mailer: Arc<RecordingMailer>,
    tokens: Arc<TokenIssuer>,
    config: Arc<AuthConfig>,
}

impl Fixture {
    fn new() -> Self {
        let config = AuthConfig::development();
        Self {
            store: Arc::new(MemoryStore::new()),
            mailer: Arc::new(RecordingMailer::default()),
            tokens: Arc::new(TokenIssuer::new(&config)),
            config: Arc::new(config),
        }
    }

    fn register(&self) -> RegisterUseCase<MemoryStore, MemoryStore, RecordingMailer> {
        RegisterUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    fn login_use_case(&self) -> LoginUseCase<MemoryStore, MemoryStore> {
        LoginUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.tokens.clone(),
            self.config.clone(),
        )
    }

    fn refresh(&self) -> RefreshUseCase<MemoryStore> {
        RefreshUseCase::new(self.store.clone(), self.tokens.clone())
    }

    fn reset(&self) -> PasswordResetUseCase<MemoryStore, MemoryStore, RecordingMailer> {
        PasswordResetUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }

    fn users(&self) -> UserManagementUseCase<MemoryStore, MemoryStore, MemoryStore> {
        UserManagementUseCase::new(
            self.store.clone(),
            self.store.clone(),
            self.store.clone(),
            self.config.clone(),
        )
    }

    /// Insert a verified account directly
    async fn verified_user(&self, username: &str, role: UserRole) -> User {
        let raw = RawPassword::new(PASSWORD.to_string()).unwrap();
        let mut user = User::new(
            Username::new(username).unwrap(),
            FullName::new("Nguyen Van An").unwrap(),
            Email::new(format!("{username}@example.com")).unwrap(),
            UserPassword::from_raw(&raw, self.config.pepper()).unwrap(),
            role,
        );
        user.mark_verified();
        self.store.insert_user(&user).await.unwrap();
        user
    }

    async fn login(&self, email: &str, password: &str) -> AuthResult<LoginOutput> {
        self.login_use_case()
            .execute(LoginInput {
                email: email.to_string(),
                password: password.to_string(),
            })
            .await
    }
}

// ============================================================================
// Verification Flow
// ============================================================================

#[tokio::test]
async fn test_register_requires_one_verification() {
    let fx = Fixture::new();
    let user = fx
        .register()
        .execute(RegisterInput {
            name: "tran thi binh".into(),
            username: "Binh.Tran".into(),
            email: "Binh@Example.com".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();

    assert!(!user.is_verified);
    assert_eq!(user.username.as_str(), "binh.tran");
    assert_eq!(user.name.as_str(), "Tran Thi Binh");
    assert_eq!(user.role, UserRole::User);

    let err = fx.login("binh@example.com", PASSWORD).await.err().unwrap();
    assert!(matches!(err, AuthError::NotVerified));

    let token = fx.mailer.last_token().await;
    let verify = VerifyEmailUseCase::new(fx.store.clone());
    verify.execute("binh@example.com", &token).await.unwrap();

    let again = verify.execute("binh@example.com", &token).await;
    assert!(matches!(again, Err(AuthError::InvalidToken)));

    assert!(fx.login("binh@example.com", PASSWORD).await.is_ok());
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let fx = Fixture::new();
    fx.verified_user("anh", UserRole::User).await;

    let err = fx
        .register()
        .execute(RegisterInput {
            name: "Someone Else".into(),
            username: "anh".into(),
            email: "other@example.com".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, AuthError::UserExists));
    assert_eq!(err.kind().status_code(), 400);
}

#[tokio::test]
async fn test_wrong_verification_token_is_rejected() {
    let fx = Fixture::new();
    fx.register()
        .execute(RegisterInput {
            name: "Le Van Cuong".into(),
            username: "cuong".into(),
            email: "cuong@example.com".into(),
            password: PASSWORD.into(),
        })
        .await
        .unwrap();

    let verify = VerifyEmailUseCase::new(fx.store.clone());
    let err = verify.execute("cuong@example.com", "guess").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

// ============================================================================
// Login / Refresh
// ============================================================================

#[tokio::test]
async fn test_login_failures_in_order() {
    let fx = Fixture::new();
    let user = fx.verified_user("anh", UserRole::User).await;

    let err = fx.login("nobody@example.com", PASSWORD).await.err().unwrap();
    assert!(matches!(err, AuthError::UnknownLogin));

    let err = fx.login("anh@example.com", "Wr0ng!pass").await.err().unwrap();
    assert!(matches!(err, AuthError::IncorrectPassword));

    fx.store.set_blocked(&[user.id], true).await.unwrap();
    let err = fx.login("anh@example.com", "Wr0ng!pass").await.err().unwrap();
    assert!(matches!(err, AuthError::IncorrectPassword));

    let err = fx.login("anh@example.com", PASSWORD).await.err().unwrap();
    assert!(matches!(err, AuthError::Blocked));
    assert_eq!(err.kind().status_code(), 403);
}

#[tokio::test]
async fn test_second_login_revokes_first_refresh_token() {
    let fx = Fixture::new();
    fx.verified_user("anh", UserRole::User).await;

    let first = fx.login("anh@example.com", PASSWORD).await.unwrap();
    let second = fx.login("anh@example.com", PASSWORD).await.unwrap();

    let err = fx
        .refresh()
        .execute(Some(&first.refresh_token))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, AuthError::RefreshTokenRevoked));
    assert_eq!(err.kind().status_code(), 403);

    let rotated = fx.refresh().execute(Some(&second.refresh_token)).await.unwrap();
    assert!(fx.tokens.verify_access_token(&rotated.access_token).is_some());

    // Rotation consumed the presented token
    let replay = fx.refresh().execute(Some(&second.refresh_token)).await;
    assert!(matches!(replay, Err(AuthError::RefreshTokenRevoked)));
    assert!(fx.refresh().execute(Some(&rotated.refresh_token)).await.is_ok());
}

#[tokio::test]
async fn test_stored_refresh_token_with_foreign_signature_is_rejected() {
    let fx = Fixture::new();
    let user = fx.verified_user("anh", UserRole::User).await;

    let foreign = TokenIssuer::new(&AuthConfig::development())
        .issue_refresh_token(user.id, user.role)
        .unwrap();
    fx.store
        .store_refresh_token(&RefreshToken::new(user.id, &foreign))
        .await
        .unwrap();

    let err = fx.refresh().execute(Some(&foreign)).await.err().unwrap();
    assert!(matches!(
        err,
        AuthError::RefreshTokenRejected(TokenError::InvalidSignature)
    ));
    assert_eq!(err.kind().status_code(), 404);
    assert_eq!(err.to_app_error().message(), "invalid signature");
}

#[tokio::test]
async fn test_refresh_without_cookie() {
    let fx = Fixture::new();
    let err = fx.refresh().execute(None).await.err().unwrap();
    assert!(matches!(err, AuthError::NotAuthenticated));
    assert_eq!(err.kind().status_code(), 401);
}

// ============================================================================
// Password Reset
// ============================================================================

#[tokio::test]
async fn test_reset_for_unknown_email() {
    let fx = Fixture::new();
    let err = fx.reset().request("ghost@example.com").await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidEmail));
}

#[tokio::test]
async fn test_expired_reset_token_is_deleted_on_access() {
    let fx = Fixture::new();
    fx.verified_user("anh", UserRole::User).await;

    fx.reset().request("anh@example.com").await.unwrap();
    let token = fx.mailer.last_token().await;
    fx.store.expire_resets();

    let err = fx.reset().check("anh@example.com", &token).await.unwrap_err();
    assert!(matches!(err, AuthError::TokenExpired));
    assert!(fx.store.with(|s| s.resets.is_empty()));

    let err = fx.reset().check("anh@example.com", &token).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidToken));
}

#[tokio::test]
async fn test_newer_reset_supersedes_older() {
    let fx = Fixture::new();
    fx.verified_user("anh", UserRole::User).await;

    fx.reset().request("anh@example.com").await.unwrap();
    let first = fx.mailer.last_token().await;
    fx.reset().request("anh@example.com").await.unwrap();
    assert_eq!(fx.mailer.sent_count(2).await, 2);
    let second = fx.mailer.last_token().await;

    assert!(matches!(
        fx.reset().check("anh@example.com", &first).await,
        Err(AuthError::InvalidToken)
    ));
    assert!(fx.reset().check("anh@example.com", &second).await.is_ok());
}

#[tokio::test]
async fn test_reset_changes_password_and_ends_sessions() {
    let fx = Fixture::new();
    fx.verified_user("anh", UserRole::User).await;
    let session = fx.login("anh@example.com", PASSWORD).await.unwrap();

    fx.reset().request("anh@example.com").await.unwrap();
    let token = fx.mailer.last_token().await;

    let weak = fx
        .reset()
        .reset("anh@example.com", &token, "short".into())
        .await;
    assert!(matches!(weak, Err(AuthError::Validation(_))));

    fx.reset()
        .reset("anh@example.com", &token, "N3w#Password".into())
        .await
        .unwrap();

    assert!(matches!(
        fx.refresh().execute(Some(&session.refresh_token)).await,
        Err(AuthError::RefreshTokenRevoked)
    ));
    assert!(matches!(
        fx.login("anh@example.com", PASSWORD).await,
        Err(AuthError::IncorrectPassword)
    ));
    assert!(fx.login("anh@example.com", "N3w#Password").await.is_ok());

    let replay = fx.reset().check("anh@example.com", &token).await;
    assert!(matches!(replay, Err(AuthError::InvalidToken)));
}

// ============================================================================
// User Management
// ============================================================================

#[tokio::test]
async fn test_blocking_revokes_sessions() {
    let fx = Fixture::new();
    let admin = fx.verified_user("admin", UserRole::Admin).await;
    let member = fx.verified_user("anh", UserRole::User).await;
    let session = fx.login("anh@example.com", PASSWORD).await.unwrap();

    fx.users().set_blocked(admin.id, member.id, true).await.unwrap();

    assert!(matches!(
        fx.refresh().execute(Some(&session.refresh_token)).await,
        Err(AuthError::RefreshTokenRevoked)
    ));

    let err = fx.users().set_blocked(admin.id, admin.id, true).await.unwrap_err();
    assert!(matches!(err, AuthError::CannotBlockSelf));

    let err = fx
        .users()
        .set_blocked(admin.id, UserId::new(), true)
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UserNotFound));
}

#[tokio::test]
async fn test_admin_created_user_is_verified() {
    let fx = Fixture::new();
    let user = fx
        .users()
        .create(CreateUserInput {
            name: "Pham Minh".into(),
            username: "minh".into(),
            email: "minh@example.com".into(),
            password: PASSWORD.into(),
            role: "admin".into(),
        })
        .await
        .unwrap();

    assert!(user.is_verified);
    assert_eq!(user.role, UserRole::Admin);

    let err = fx
        .users()
        .create(CreateUserInput {
            name: "Pham Minh".into(),
            username: "minh2".into(),
            email: "minh2@example.com".into(),
            password: PASSWORD.into(),
            role: "moderator".into(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::UnknownRole(_)));
}

#[tokio::test]
async fn test_role_registry() {
    let fx = Fixture::new();
    let roles = RoleUseCase::new(fx.store.clone());

    assert_eq!(roles.list().await.unwrap().len(), 3);
    assert!(matches!(roles.create("admin").await, Err(AuthError::RoleExists)));
    assert!(matches!(
        roles.create("superuser").await,
        Err(AuthError::UnknownRole(_))
    ));
}

#[tokio::test]
async fn test_change_role_of_many() {
    let fx = Fixture::new();
    let a = fx.verified_user("anh", UserRole::User).await;
    let b = fx.verified_user("binh", UserRole::User).await;

    let changed = fx.users().change_role(&[a.id, b.id], "master").await.unwrap();
    assert_eq!(changed, 2);

    let b = fx.users().find(&b.id).await.unwrap();
    assert_eq!(b.role, UserRole::Master);
}

#[tokio::test]
async fn test_demoted_admin_cannot_refresh_old_role() {
    let fx = Fixture::new();
    let boss = fx.verified_user("boss", UserRole::Admin).await;
    let session = fx.login("boss@example.com", PASSWORD).await.unwrap();

    fx.users().change_role(&[boss.id], "user").await.unwrap();

    let err = fx
        .refresh()
        .execute(Some(&session.refresh_token))
        .await
        .err()
        .unwrap();
    assert!(matches!(err, AuthError::RefreshTokenRevoked));

    let again = fx.login("boss@example.com", PASSWORD).await.unwrap();
    let claims = fx.tokens.verify_access_token(&again.access_token).unwrap();
    assert_eq!(claims.role, UserRole::User);
}

// ============================================================================
// Router / Gate
// ============================================================================

fn users_app(fx: &Fixture) -> axum::Router {
    let media = DiskMediaStore::new(MediaConfig {
        dir: std::env::temp_dir().join("auth-router-test"),
        ..Default::default()
    });
    let state = AuthAppState::new(
        (*fx.store).clone(),
        fx.mailer.clone(),
        Arc::new(media),
        fx.tokens.clone(),
        fx.config.clone(),
    );
    users_router(state)
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let builder = Request::builder().uri(uri);
    let builder = match token {
        Some(token) => builder.header(header::AUTHORIZATION, format!("Bearer {token}")),
        None => builder,
    };
    builder.body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_gate_status_taxonomy() {
    let fx = Fixture::new();
    let member = fx.verified_user("anh", UserRole::User).await;
    let admin = fx.verified_user("boss", UserRole::Admin).await;
    let member_token = fx.tokens.issue_access_token(member.id, member.role).unwrap();
    let admin_token = fx.tokens.issue_access_token(admin.id, admin.role).unwrap();

    let res = users_app(&fx).oneshot(get("/me", None)).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = users_app(&fx)
        .oneshot(get("/me", Some("not.a.jwt")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = users_app(&fx)
        .oneshot(get("/me", Some(&member_token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = users_app(&fx)
        .oneshot(get("/", Some(&member_token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = users_app(&fx)
        .oneshot(get("/", Some(&admin_token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_profile_is_private_but_card_is_public() {
    let fx = Fixture::new();
    let a = fx.verified_user("anh", UserRole::User).await;
    let b = fx.verified_user("binh", UserRole::User).await;
    let token = fx.tokens.issue_access_token(a.id, a.role).unwrap();

    let res = users_app(&fx)
        .oneshot(get(&format!("/{}", b.id), Some(&token)))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = users_app(&fx)
        .oneshot(get(&format!("/public/{}", b.id), None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = users_app(&fx)
        .oneshot(get("/public/username/nobody", None))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
