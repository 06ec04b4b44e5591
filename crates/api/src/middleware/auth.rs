//! Authentication gateway.
//!
//! [`RequireAuth`] guards every protected route. It reads a bearer token,
//! verifies it, and re-reads the account so a deleted user is turned away
//! even while their token is still within its validity window.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

use rentmyfit_core::{Email, Role, UserId};

use crate::db::users::UserRepository;
use crate::error::{AppError, set_sentry_user};
use crate::services::auth::TokenError;
use crate::state::AppState;

/// Identity of the caller, taken from the live account record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub role: Role,
    pub email: Email,
}

/// Extractor that requires a valid bearer token for an existing account.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(RequireAuth(user): RequireAuth) -> impl IntoResponse {
///     format!("Hello, {}!", user.email)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAuth(pub CurrentUser);

/// Pull the token out of an `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

impl FromRequestParts<AppState> for RequireAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthorized("No token provided".to_owned()))?;

        let claims = state.tokens().verify(token).map_err(|e| match e {
            TokenError::Expired => AppError::Unauthorized("Token expired".to_owned()),
            _ => AppError::Unauthorized("Invalid token".to_owned()),
        })?;
        let user_id = claims
            .user_id()
            .map_err(|_| AppError::Unauthorized("Invalid token".to_owned()))?;

        let user = UserRepository::new(state.pool())
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized("User not found".to_owned()))?;

        if user.role != claims.role {
            tracing::debug!(user_id = %user.id, "Role changed since token was issued");
        }
        set_sentry_user(&user.id, Some(user.email.as_str()));

        Ok(Self(CurrentUser {
            id: user.id,
            role: user.role,
            email: user.email,
        }))
    }
}
