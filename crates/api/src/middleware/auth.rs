//! `AuthUser` extractor for handlers that need a signed-in user.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use journey_core::error::CoreError;
use journey_core::types::DbId;

use crate::error::AppError;
use crate::state::AppState;

/// The user behind a valid `Authorization: Bearer <access token>` header.
///
/// Taking it as a handler argument is what makes a route protected; every
/// query a handler issues is then scoped by `user_id`.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: DbId,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let claims = state
            .config
            .jwt
            .decode_access_token(token)
            .map_err(|e| {
                tracing::debug!(error = %e, "Rejected access token");
                unauthorized("Invalid or expired token")
            })?;

        Ok(Self {
            user_id: claims.sub,
        })
    }
}

fn bearer_token(parts: &Parts) -> Result<&str, AppError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .ok_or_else(|| unauthorized("Missing Authorization header"))?;

    header
        .to_str()
        .ok()
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| unauthorized("Authorization header must be 'Bearer <token>'"))
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}
