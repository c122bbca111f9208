//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{HeaderMap, header};
use axum::response::IntoResponse;
use kernel::id::UserId;
use kernel::response::ApiResponse;
use platform::mail::MailSender;
use platform::media::{MediaError, MediaStore, Upload};

use crate::application::config::{AuthConfig, REFRESH_COOKIE_NAME};
use crate::application::token::TokenIssuer;
use crate::application::{
    CreateUserInput, LoginInput, LoginUseCase, LogoutUseCase, PasswordResetUseCase,
    ProfileChanges, ProfileUseCase, RefreshUseCase, RegisterInput, RegisterUseCase, RoleUseCase,
    UserManagementUseCase, VerifyEmailUseCase,
};
use crate::domain::repository::AuthStore;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccessTokenResponse, BlockUsersRequest, ChangePasswordRequest, ChangeRolesRequest,
    CreateRoleRequest, CreateUserRequest, ForgetPasswordRequest, LoginRequest, LoginResponse,
    ModifiedPayload, PublicUserResponse, RegisterRequest, ResetPasswordRequest, RoleChangeRequest,
    RolePayload, RoleResponse, RolesPayload, TokenQuery, UpdateProfileRequest, UserPayload,
    UserResponse, UsersPayload,
};
use crate::presentation::middleware::AuthUser;

/// Shared state for auth handlers
pub struct AuthAppState<R, M, S>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    pub repo: Arc<R>,
    pub mailer: Arc<M>,
    pub media: Arc<S>,
    pub tokens: Arc<TokenIssuer>,
    pub config: Arc<AuthConfig>,
}

impl<R, M, S> Clone for AuthAppState<R, M, S>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            mailer: self.mailer.clone(),
            media: self.media.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

impl<R, M, S> AuthAppState<R, M, S>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    /// Mailer, media store, issuer and config are shared with the other crates
    pub fn new(
        repo: R,
        mailer: Arc<M>,
        media: Arc<S>,
        tokens: Arc<TokenIssuer>,
        config: Arc<AuthConfig>,
    ) -> Self {
        Self {
            repo: Arc::new(repo),
            mailer,
            media,
            tokens,
            config,
        }
    }

    fn users(&self) -> UserManagementUseCase<R, R, R> {
        UserManagementUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.repo.clone(),
            self.config.clone(),
        )
    }

    fn profile(&self) -> ProfileUseCase<R, S> {
        ProfileUseCase::new(self.repo.clone(), self.media.clone(), self.config.clone())
    }

    fn password_reset(&self) -> PasswordResetUseCase<R, R, M> {
        PasswordResetUseCase::new(
            self.repo.clone(),
            self.repo.clone(),
            self.mailer.clone(),
            self.config.clone(),
        )
    }
}

// ============================================================================
// Register / Login / Tokens
// ============================================================================

/// POST /api/v1/auth/register
pub async fn register<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let use_case = RegisterUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.mailer.clone(),
        state.config.clone(),
    );

    let user = use_case
        .execute(RegisterInput {
            name: req.name,
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(ApiResponse::created(
        "Register successfully, please check your email to verify your account",
        UserPayload {
            user: UserResponse::from(&user),
        },
    ))
}

/// POST /api/v1/auth/login
pub async fn login<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let use_case = LoginUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    let cookie = state
        .config
        .refresh_cookie()
        .build_set_cookie(&output.refresh_token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::ok(
            "Login successfully",
            LoginResponse {
                access_token: output.access_token,
                user: UserResponse::from(&output.user),
            },
        ),
    ))
}

/// POST /api/v1/auth/refresh-token
pub async fn refresh_token<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let presented = platform::cookie::extract_cookie(&headers, REFRESH_COOKIE_NAME);

    let use_case = RefreshUseCase::new(state.repo.clone(), state.tokens.clone());
    let output = use_case.execute(presented.as_deref()).await?;

    let cookie = state
        .config
        .refresh_cookie()
        .build_set_cookie(&output.refresh_token);

    Ok((
        [(header::SET_COOKIE, cookie)],
        ApiResponse::ok(
            "Refresh token successfully",
            AccessTokenResponse {
                access_token: output.access_token,
            },
        ),
    ))
}

/// POST /api/v1/auth/logout
pub async fn logout<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    headers: HeaderMap,
) -> AuthResult<impl IntoResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let presented = platform::cookie::extract_cookie(&headers, REFRESH_COOKIE_NAME);

    LogoutUseCase::new(state.repo.clone())
        .execute(presented.as_deref())
        .await?;

    let cookie = state.config.refresh_cookie().build_delete_cookie();

    Ok(([(header::SET_COOKIE, cookie)], ApiResponse::message("Logged out")))
}

// ============================================================================
// Verification Flow
// ============================================================================

/// GET /verify?email&token
pub async fn verify_email<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Query(query): Query<TokenQuery>,
) -> AuthResult<ApiResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    VerifyEmailUseCase::new(state.repo.clone())
        .execute(&query.email, &query.token)
        .await?;

    Ok(ApiResponse::message("Your account has been verified"))
}

/// POST /api/v1/auth/forget-password
pub async fn forget_password<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Json(req): Json<ForgetPasswordRequest>,
) -> AuthResult<ApiResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    state.password_reset().request(&req.email).await?;

    Ok(ApiResponse::message(
        "Please! Check your email to change your password",
    ))
}

/// GET /change-password?email&token
pub async fn check_reset_token<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Query(query): Query<TokenQuery>,
) -> AuthResult<ApiResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    state
        .password_reset()
        .check(&query.email, &query.token)
        .await?;

    Ok(ApiResponse::message("Token is valid"))
}

/// PUT /change-password?email&token
pub async fn reset_password<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Query(query): Query<TokenQuery>,
    Json(req): Json<ResetPasswordRequest>,
) -> AuthResult<ApiResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    state
        .password_reset()
        .reset(&query.email, &query.token, req.password)
        .await?;

    Ok(ApiResponse::message("Change password successfully"))
}

// ============================================================================
// Users (admin)
// ============================================================================

/// GET /api/v1/users
pub async fn list_users<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
) -> AuthResult<ApiResponse<UsersPayload>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let users = state.users().list().await?;

    Ok(ApiResponse::ok(
        "Get all users successfully",
        UsersPayload {
            users: users.iter().map(UserResponse::from).collect(),
        },
    ))
}

/// POST /api/v1/users
pub async fn create_user<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Json(req): Json<CreateUserRequest>,
) -> AuthResult<ApiResponse<UserPayload<UserResponse>>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let user = state
        .users()
        .create(CreateUserInput {
            name: req.name,
            username: req.username,
            email: req.email,
            password: req.password,
            role: req.role,
        })
        .await?;

    Ok(ApiResponse::created(
        "Create user successfully",
        UserPayload {
            user: UserResponse::from(&user),
        },
    ))
}

/// PUT /api/v1/users/block/{id}
pub async fn block_user<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    actor: AuthUser,
    Path(id): Path<UserId>,
) -> AuthResult<ApiResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    state.users().set_blocked(actor.user_id, id, true).await?;
    Ok(ApiResponse::message("Block user successfully"))
}

/// PUT /api/v1/users/unblock/{id}
pub async fn unblock_user<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    actor: AuthUser,
    Path(id): Path<UserId>,
) -> AuthResult<ApiResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    state.users().set_blocked(actor.user_id, id, false).await?;
    Ok(ApiResponse::message("Unblock user successfully"))
}

/// PUT /api/v1/users/block-unblock/users
pub async fn block_unblock_users<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    actor: AuthUser,
    Json(req): Json<BlockUsersRequest>,
) -> AuthResult<ApiResponse<ModifiedPayload>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let modified_count = state
        .users()
        .set_blocked_many(actor.user_id, &req.ids, req.is_blocked)
        .await?;

    let message = if req.is_blocked {
        "Block users successfully"
    } else {
        "Unblock users successfully"
    };
    Ok(ApiResponse::ok(message, ModifiedPayload { modified_count }))
}

/// PUT /api/v1/users/role-change/{id}
pub async fn change_user_role<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Path(id): Path<UserId>,
    Json(req): Json<RoleChangeRequest>,
) -> AuthResult<ApiResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    state.users().change_role(&[id], &req.role).await?;
    Ok(ApiResponse::message("Change role successfully"))
}

/// PUT /api/v1/users/change-roles/users
pub async fn change_users_role<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Json(req): Json<ChangeRolesRequest>,
) -> AuthResult<ApiResponse<ModifiedPayload>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let modified_count = state.users().change_role(&req.ids, &req.role).await?;
    Ok(ApiResponse::ok(
        "Change roles successfully",
        ModifiedPayload { modified_count },
    ))
}

// ============================================================================
// Users (self)
// ============================================================================

/// GET /api/v1/users/me
pub async fn me<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    actor: AuthUser,
) -> AuthResult<ApiResponse<UserPayload<UserResponse>>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let user = state.profile().me(actor.user_id).await?;
    Ok(ApiResponse::ok(
        "Get user successfully",
        UserPayload {
            user: UserResponse::from(&user),
        },
    ))
}

/// GET /api/v1/users/{id}
pub async fn get_user<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    actor: AuthUser,
    Path(id): Path<UserId>,
) -> AuthResult<ApiResponse<UserPayload<UserResponse>>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let user = state.profile().get(actor.user_id, id).await?;
    Ok(ApiResponse::ok(
        "Get user successfully",
        UserPayload {
            user: UserResponse::from(&user),
        },
    ))
}

/// PUT /api/v1/users/{id}
pub async fn update_profile<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    actor: AuthUser,
    Path(id): Path<UserId>,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<ApiResponse<UserPayload<UserResponse>>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let changes = ProfileChanges {
        name: req.name,
        bio: req.bio,
        gender: req.gender,
    };
    let user = state.profile().update(actor.user_id, id, changes).await?;

    Ok(ApiResponse::ok(
        "Update user successfully",
        UserPayload {
            user: UserResponse::from(&user),
        },
    ))
}

/// PUT /api/v1/users/avatar/{id} (multipart field `image`)
pub async fn update_avatar<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    actor: AuthUser,
    Path(id): Path<UserId>,
    multipart: Multipart,
) -> AuthResult<ApiResponse<UserPayload<UserResponse>>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let upload = read_image(multipart).await?;
    let user = state
        .profile()
        .update_avatar(actor.user_id, id, upload)
        .await?;

    Ok(ApiResponse::ok(
        "Update avatar successfully",
        UserPayload {
            user: UserResponse::from(&user),
        },
    ))
}

/// PUT /api/v1/users/change-password/user
pub async fn change_password<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    actor: AuthUser,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<ApiResponse>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    state
        .profile()
        .change_password(actor.user_id, req.old_password, req.new_password)
        .await?;

    Ok(ApiResponse::message("Change password successfully"))
}

// ============================================================================
// Users (public)
// ============================================================================

/// GET /api/v1/users/public/{id}
pub async fn public_user<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Path(id): Path<UserId>,
) -> AuthResult<ApiResponse<UserPayload<PublicUserResponse>>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let user = state.users().find(&id).await?;
    Ok(ApiResponse::ok(
        "Get user successfully",
        UserPayload {
            user: PublicUserResponse::from(&user),
        },
    ))
}

/// GET /api/v1/users/public/username/{username}
pub async fn public_user_by_username<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Path(username): Path<String>,
) -> AuthResult<ApiResponse<UserPayload<PublicUserResponse>>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let user = state.users().find_by_username(&username).await?;
    Ok(ApiResponse::ok(
        "Get user successfully",
        UserPayload {
            user: PublicUserResponse::from(&user),
        },
    ))
}

// ============================================================================
// Roles
// ============================================================================

/// GET /api/v1/roles
pub async fn list_roles<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
) -> AuthResult<ApiResponse<RolesPayload>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let roles = RoleUseCase::new(state.repo.clone()).list().await?;
    Ok(ApiResponse::ok(
        "Get all roles successfully",
        RolesPayload {
            roles: roles.iter().map(RoleResponse::from).collect(),
        },
    ))
}

/// POST /api/v1/roles
pub async fn create_role<R, M, S>(
    State(state): State<AuthAppState<R, M, S>>,
    Json(req): Json<CreateRoleRequest>,
) -> AuthResult<ApiResponse<RolePayload>>
where
    R: AuthStore,
    M: MailSender + Sync + 'static,
    S: MediaStore + Sync + 'static,
{
    let role = RoleUseCase::new(state.repo.clone())
        .create(&req.name)
        .await?;

    Ok(ApiResponse::created(
        "Role created successfully",
        RolePayload {
            role: RoleResponse::from(&role),
        },
    ))
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Take the `image` field of a multipart body
async fn read_image(mut multipart: Multipart) -> AuthResult<Upload> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AuthError::Validation(e.body_text()))?
    {
        if field.name() != Some("image") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AuthError::Validation(e.body_text()))?;

        return Ok(Upload {
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        });
    }

    Err(AuthError::Media(MediaError::Empty))
}
