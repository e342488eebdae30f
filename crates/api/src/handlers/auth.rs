//! `/auth`: accounts, token issuance and the caller's own profile.
//!
//! Register, login and refresh all answer with a bare [`AuthResponse`];
//! profile reads and writes use the usual `{ "data": ... }` envelope.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use journey_core::error::CoreError;
use journey_db::models::session::NewSession;
use journey_db::models::user::{CreateUser, PublicUser, UpdateProfile, User};
use journey_db::repositories::{SessionRepo, UserRepo};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::auth::jwt::{hash_refresh_token, RefreshToken};
use crate::auth::password::{ensure_strong, hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::handlers::validate_body;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50, message = "username must be 3-50 characters"))]
    pub username: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// `username` also accepts the account email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[validate(email(message = "email must be a valid address"))]
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Seconds until `access_token` expires.
    pub expires_in: i64,
    pub user: PublicUser,
}

/// POST /api/v1/auth/register → 201. Taken usernames or emails give 409.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    validate_body(&input)?;
    ensure_strong(&input.password)?;

    let new_user = CreateUser {
        username: input.username.trim().to_string(),
        email: normalize_email(&input.email),
        password_hash: hash_password(&input.password).map_err(hashing_failed)?,
        first_name: input.first_name,
        last_name: input.last_name,
    };
    let user = UserRepo::create(&state.pool, &new_user).await?;
    tracing::info!(user_id = user.id, username = %user.username, "Account created");

    Ok((StatusCode::CREATED, Json(sign_in(&state, user).await?)))
}

/// POST /api/v1/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let Some(user) = UserRepo::find_by_login(&state.pool, input.username.trim()).await? else {
        return Err(bad_credentials());
    };

    if !verify_password(&input.password, &user.password_hash).map_err(hashing_failed)? {
        tracing::info!(user_id = user.id, "Login refused");
        return Err(bad_credentials());
    }

    Ok(Json(sign_in(&state, user).await?))
}

/// POST /api/v1/auth/refresh
///
/// Single use: the presented token is revoked and a new pair is returned.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let replacement = RefreshToken::generate();
    let session = SessionRepo::rotate(
        &state.pool,
        &hash_refresh_token(&input.refresh_token),
        &replacement.hash,
        state.config.jwt.refresh_expires_at(Utc::now()),
    )
    .await?
    .ok_or_else(|| unauthorized("Invalid or expired refresh token"))?;

    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))?;

    Ok(Json(issue(&state, user, replacement)?))
}

/// POST /api/v1/auth/logout → 204. Signs the user out everywhere.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> AppResult<StatusCode> {
    let revoked = SessionRepo::revoke_all(&state.pool, auth.user_id).await?;
    tracing::info!(user_id = auth.user_id, revoked, "Sessions revoked");
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/profile
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<PublicUser>>> {
    let user = current_user(&state, &auth).await?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// PUT /api/v1/auth/profile
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<UpdateProfileRequest>,
) -> AppResult<Json<DataResponse<PublicUser>>> {
    validate_body(&input)?;

    let changes = UpdateProfile {
        first_name: input.first_name,
        last_name: input.last_name,
        email: input.email.as_deref().map(normalize_email),
    };
    let user = UserRepo::update_profile(&state.pool, auth.user_id, &changes)
        .await?
        .ok_or_else(|| user_not_found(&auth))?;

    Ok(Json(DataResponse { data: user.into() }))
}

/// POST /api/v1/auth/change-password → 204. Open sessions are left alone.
pub async fn change_password(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<ChangePasswordRequest>,
) -> AppResult<StatusCode> {
    let user = current_user(&state, &auth).await?;

    if !verify_password(&input.current_password, &user.password_hash).map_err(hashing_failed)? {
        return Err(AppError::BadRequest("Current password is incorrect".into()));
    }
    ensure_strong(&input.new_password)?;

    let new_hash = hash_password(&input.new_password).map_err(hashing_failed)?;
    if !UserRepo::set_password_hash(&state.pool, user.id, &new_hash).await? {
        return Err(user_not_found(&auth));
    }

    tracing::info!(user_id = user.id, "Password changed");
    Ok(StatusCode::NO_CONTENT)
}

/// Open a fresh session for `user` and hand out its tokens.
async fn sign_in(state: &AppState, user: User) -> AppResult<AuthResponse> {
    let refresh = RefreshToken::generate();
    let session = NewSession {
        user_id: user.id,
        token_hash: &refresh.hash,
        expires_at: state.config.jwt.refresh_expires_at(Utc::now()),
    };
    SessionRepo::open(&state.pool, &session).await?;
    issue(state, user, refresh)
}

/// Sign an access token for `user` and pair it with an already-persisted
/// refresh token.
fn issue(state: &AppState, user: User, refresh: RefreshToken) -> AppResult<AuthResponse> {
    let jwt = &state.config.jwt;
    let access_token = jwt
        .issue_access_token(user.id)
        .map_err(|e| AppError::InternalError(format!("Token signing failed: {e}")))?;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh.plaintext,
        expires_in: jwt.access_token_lifetime_secs(),
        user: user.into(),
    })
}

async fn current_user(state: &AppState, auth: &AuthUser) -> AppResult<User> {
    UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| user_not_found(auth))
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn hashing_failed(e: argon2::password_hash::Error) -> AppError {
    AppError::InternalError(format!("Password hashing failed: {e}"))
}

fn bad_credentials() -> AppError {
    unauthorized("Invalid username or password")
}

fn unauthorized(message: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(message.to_string()))
}

fn user_not_found(auth: &AuthUser) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "User",
        id: auth.user_id,
    })
}
