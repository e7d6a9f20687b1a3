use axum::{
    Json,
    extract::{FromRequestParts, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, request::Parts},
};
use std::sync::Arc;

use super::{
    ApiError, AppState, RegisterRequest, TokenRequest, TokenResponse, UpdateProfileRequest,
    UserDto,
};
use crate::db::User;
use crate::services::{AuthError, Registration};

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials
            | AuthError::InactiveUser
            | AuthError::EmailTaken(_)
            | AuthError::Validation(_) => Self::validation(err.to_string()),
            AuthError::UserNotFound => Self::NotFound(err.to_string()),
            AuthError::Unauthorized => Self::Unauthorized(err.to_string()),
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::Internal(msg) => Self::internal(msg),
        }
    }
}

// ============================================================================
// Extractors
// ============================================================================

/// The caller, resolved from their token. Rejects with 401 when the request
/// carries no token, an unknown one, or one belonging to an inactive user.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = extract_token(&parts.headers).ok_or_else(ApiError::unauthenticated)?;

        let user = state
            .auth_service()
            .authenticate(&token)
            .await
            .map_err(|e| match e {
                AuthError::Database(msg) => ApiError::DatabaseError(msg),
                AuthError::Internal(msg) => ApiError::internal(msg),
                AuthError::InactiveUser => {
                    ApiError::Unauthorized("User inactive or deleted".to_string())
                }
                _ => ApiError::Unauthorized("Invalid token".to_string()),
            })?;

        tracing::Span::current().record("user_id", user.id);
        Ok(Self(user))
    }
}

/// An authenticated caller with the staff flag. 401 without credentials,
/// 403 for non-staff.
#[derive(Debug, Clone)]
pub struct StaffUser(pub User);

impl FromRequestParts<Arc<AppState>> for StaffUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) = AuthUser::from_request_parts(parts, state).await?;

        if !user.is_staff {
            tracing::warn!(user_id = user.id, "Staff-only endpoint refused");
            return Err(ApiError::forbidden());
        }

        Ok(Self(user))
    }
}

/// Extract the token from, in order:
/// 1. `Authorization: Token <key>`
/// 2. `Authorization: Bearer <key>`
/// 3. `X-Api-Key` header
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(auth_header) = headers.get("Authorization")
        && let Ok(auth_str) = auth_header.to_str()
    {
        let token = auth_str
            .strip_prefix("Token ")
            .or_else(|| auth_str.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());

        if let Some(token) = token {
            return Some(token.to_string());
        }
    }

    if let Some(api_key) = headers.get("X-Api-Key")
        && let Ok(key_str) = api_key.to_str()
        && !key_str.trim().is_empty()
    {
        return Some(key_str.trim().to_string());
    }

    None
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /users
pub async fn register(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UserDto>), ApiError> {
    let Json(payload) = payload?;

    let user = state
        .auth_service()
        .register(Registration {
            email: payload.email,
            password: payload.password,
            name: payload.name,
            ..Registration::default()
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserDto::from(user))))
}

/// POST /users/token
/// Exchange credentials for the user's token
pub async fn obtain_token(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> Result<Json<TokenResponse>, ApiError> {
    let Json(payload) = payload?;

    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(ApiError::validation("Email and password are required"));
    }

    let token = state
        .auth_service()
        .obtain_token(&payload.email, &payload.password)
        .await?;

    Ok(Json(TokenResponse { token }))
}

/// DELETE /users/token
/// Revoke the caller's token; the next obtain call issues a fresh one
pub async fn revoke_token(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
) -> Result<StatusCode, ApiError> {
    state.auth_service().revoke_token(user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /users/me
pub async fn get_me(AuthUser(user): AuthUser) -> Json<UserDto> {
    Json(UserDto::from(user))
}

/// PATCH /users/me
pub async fn update_me(
    State(state): State<Arc<AppState>>,
    AuthUser(user): AuthUser,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> Result<Json<UserDto>, ApiError> {
    let Json(payload) = payload?;

    let updated = state
        .auth_service()
        .update_profile(user.id, payload.name, payload.password)
        .await?;

    tracing::info!(user_id = updated.id, "Profile updated");

    Ok(Json(UserDto::from(updated)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(name: &'static str, value: &'static str) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(name, HeaderValue::from_static(value));
        map
    }

    #[test]
    fn test_extract_token_schemes() {
        assert_eq!(
            extract_token(&headers("authorization", "Token abc123")),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_token(&headers("authorization", "Bearer abc123")),
            Some("abc123".to_string())
        );
        assert_eq!(
            extract_token(&headers("x-api-key", "abc123")),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_extract_token_rejects_other_schemes() {
        assert_eq!(extract_token(&headers("authorization", "Basic abc123")), None);
        assert_eq!(extract_token(&headers("authorization", "Token ")), None);
        assert_eq!(extract_token(&HeaderMap::new()), None);
    }
}
