//! Account routes: registration, login, profile and deletion.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::extract::ApiJson;
use crate::middleware::RequireAuth;
use crate::models::user::{AccountSummary, LoginProfile, User};
use crate::routes::MessageResponse;
use crate::services::AuthService;
use crate::services::auth::ProfileChanges;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: &'static str,
    pub user: AccountSummary,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub token: String,
    pub user: LoginProfile,
}

#[derive(Debug, Serialize)]
pub struct ProfileUpdatedResponse {
    pub message: &'static str,
    pub user: User,
}

/// POST /api/auth/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>)> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let user = auth
        .register(
            request.name.as_deref().unwrap_or_default(),
            request.email.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "Registered successfully",
            user: AccountSummary::from(&user),
        }),
    ))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same 401.
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());

    let (user, token) = auth
        .login(
            request.email.as_deref().unwrap_or_default(),
            request.password.as_deref().unwrap_or_default(),
        )
        .await?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        message: "Login successful",
        token,
        user: LoginProfile::from(user),
    }))
}

/// GET /api/auth/profile
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<User>> {
    let auth = AuthService::new(state.pool(), state.tokens());
    Ok(Json(auth.profile(current.id).await?))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
    ApiJson(changes): ApiJson<ProfileChanges>,
) -> Result<Json<ProfileUpdatedResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());
    let user = auth.update_profile(current.id, changes).await?;

    Ok(Json(ProfileUpdatedResponse {
        message: "Profile updated",
        user,
    }))
}

/// DELETE /api/auth/account
pub async fn delete_account(
    State(state): State<AppState>,
    RequireAuth(current): RequireAuth,
) -> Result<Json<MessageResponse>> {
    let auth = AuthService::new(state.pool(), state.tokens());
    auth.delete_account(current.id).await?;

    Ok(Json(MessageResponse {
        message: "Account deleted",
    }))
}
