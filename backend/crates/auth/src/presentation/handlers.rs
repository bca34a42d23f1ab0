//! HTTP Handlers

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use std::sync::Arc;

use audit::{AuditRecorder, AuditRepository};
use kernel::id::UserId;
use kernel::response::ApiResponse;
use platform::gate::Actor;
use platform::jwt::TokenService;
use platform::mail::Mailer;

use crate::application::config::AuthConfig;
use crate::application::{
    ChangeInfoUseCase, ChangeUserStateUseCase, CreateRoleUseCase, CreateUserUseCase,
    ListUsersUseCase, SetPasswordInput, SetPasswordUseCase, SignInUseCase, UpdateUserUseCase,
    UserStateChange,
};
use crate::domain::repository::{RoleRepository, UserRepository, VerificationCodeStore};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangeInfoRequest, CodeQuery, CreateRoleRequest, RoleResponse, SetPasswordRequest,
    SignInRequest, SignInResponse, UserProfileRequest, UserResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R, C, A, M>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub codes: Arc<C>,
    pub audit: Arc<A>,
    pub mailer: Arc<M>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

impl<R, C, A, M> AuthAppState<R, C, A, M>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    fn recorder(&self) -> AuditRecorder<A> {
        AuditRecorder::new(self.audit.clone())
    }
}

// ============================================================================
// Roles
// ============================================================================

/// POST /api/admin/users/roles
pub async fn create_role<R, C, A, M>(
    State(state): State<AuthAppState<R, C, A, M>>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<CreateRoleRequest>,
) -> AuthResult<ApiResponse<RoleResponse>>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = CreateRoleUseCase::new(state.repo.clone(), state.recorder());
    let role = use_case.execute(actor.user_id, req.into()).await?;

    Ok(ApiResponse::new(201, "Role created", Some(role.into())))
}

// ============================================================================
// Admin user management
// ============================================================================

/// POST /api/admin/users/create
pub async fn create_user<R, C, A, M>(
    State(state): State<AuthAppState<R, C, A, M>>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<UserProfileRequest>,
) -> AuthResult<ApiResponse<()>>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = CreateUserUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.codes.clone(),
        state.recorder(),
        state.mailer.clone(),
        state.config.clone(),
    );
    use_case.execute(actor.user_id, req.into()).await?;

    Ok(ApiResponse::created("User created"))
}

/// PUT /api/admin/users/update-info/{user_id}
pub async fn update_user<R, C, A, M>(
    State(state): State<AuthAppState<R, C, A, M>>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<i64>,
    Json(req): Json<UserProfileRequest>,
) -> AuthResult<ApiResponse<()>>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = UpdateUserUseCase::new(state.repo.clone(), state.repo.clone(), state.recorder());
    use_case
        .execute(actor.user_id, UserId::from_raw(user_id), req.into())
        .await?;

    Ok(ApiResponse::done("User updated"))
}

/// PUT /api/admin/users/deactivate/{user_id}
pub async fn deactivate_user<R, C, A, M>(
    State(state): State<AuthAppState<R, C, A, M>>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<i64>,
) -> AuthResult<ApiResponse<()>>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = ChangeUserStateUseCase::new(state.repo.clone(), state.recorder());
    use_case
        .execute(
            actor.user_id,
            UserId::from_raw(user_id),
            UserStateChange::Deactivate,
        )
        .await?;

    Ok(ApiResponse::done("User deactivated"))
}

/// PUT /api/admin/users/delete/{user_id}
pub async fn delete_user<R, C, A, M>(
    State(state): State<AuthAppState<R, C, A, M>>,
    Extension(actor): Extension<Actor>,
    Path(user_id): Path<i64>,
) -> AuthResult<ApiResponse<()>>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = ChangeUserStateUseCase::new(state.repo.clone(), state.recorder());
    use_case
        .execute(
            actor.user_id,
            UserId::from_raw(user_id),
            UserStateChange::Delete,
        )
        .await?;

    Ok(ApiResponse::done("User deleted"))
}

/// GET /api/admin/users
pub async fn list_users<R, C, A, M>(
    State(state): State<AuthAppState<R, C, A, M>>,
) -> AuthResult<ApiResponse<Vec<UserResponse>>>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let users = ListUsersUseCase::new(state.repo.clone()).execute().await?;

    Ok(ApiResponse::ok(
        users.into_iter().map(UserResponse::from).collect(),
    ))
}

// ============================================================================
// Password set / sign in
// ============================================================================

/// POST /api/users/password?code=
pub async fn set_password<R, C, A, M>(
    State(state): State<AuthAppState<R, C, A, M>>,
    Query(query): Query<CodeQuery>,
    Json(req): Json<SetPasswordRequest>,
) -> AuthResult<ApiResponse<()>>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SetPasswordUseCase::new(
        state.repo.clone(),
        state.codes.clone(),
        state.config.clone(),
    );

    let input = SetPasswordInput {
        code: query.code.or(req.code).unwrap_or_default(),
        password: req.password,
        confirm_password: req.confirm_password,
    };
    use_case.execute(input).await?;

    Ok(ApiResponse::created("Password set"))
}

/// POST /api/users/login
pub async fn sign_in<R, C, A, M>(
    State(state): State<AuthAppState<R, C, A, M>>,
    Json(req): Json<SignInRequest>,
) -> AuthResult<ApiResponse<SignInResponse>>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );
    let output = use_case.execute(req.into()).await?;

    Ok(ApiResponse::new(200, "User login", Some(output.into())))
}

/// PUT /api/users/change-info
pub async fn change_info<R, C, A, M>(
    State(state): State<AuthAppState<R, C, A, M>>,
    Extension(actor): Extension<Actor>,
    Json(req): Json<ChangeInfoRequest>,
) -> AuthResult<ApiResponse<()>>
where
    R: UserRepository + RoleRepository + Clone + Send + Sync + 'static,
    C: VerificationCodeStore + Clone + Send + Sync + 'static,
    A: AuditRepository + Clone + Send + Sync + 'static,
    M: Mailer + Clone + Send + Sync + 'static,
{
    let use_case = ChangeInfoUseCase::new(state.repo.clone());
    use_case.execute(actor.user_id, req.into()).await?;

    Ok(ApiResponse::done("Data updated"))
}
