//! HTTP handlers for auth routes.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use blogstack_core::auth::{
    normalize_email, validate_login, validate_signup, AuthError as CoreError, LoginRequest,
    PublicUser, SignupRequest, TokenResponse, User,
};
use blogstack_core::storage::RepositoryError;
use chrono::Utc;

use crate::error::AuthError;
use crate::extractors::{CurrentUser, JsonBody};
use crate::password::{hash_password, verify_password};
use crate::token::issue_token;
use crate::AuthState;

/// Creates the auth router. Mount it under `/api/auth`.
///
/// Routes:
/// - `POST /signup` - Register and receive a token
/// - `POST /login` - Exchange credentials for a token
/// - `GET /user` - Get the authenticated user
pub fn auth_routes() -> Router<AuthState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/user", get(current_user))
}

async fn signup(
    State(state): State<AuthState>,
    JsonBody(req): JsonBody<SignupRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    validate_signup(&req)?;

    let email = normalize_email(&req.email);
    if state.users.get_user_by_email(&email).await?.is_some() {
        return Err(CoreError::UserExists.into());
    }

    let password_hash = hash_password(&req.password, state.config.bcrypt_cost).await?;
    let user = User::new(req.name.trim(), email, password_hash);

    match state.users.create_user(&user).await {
        Ok(()) => {}
        // Lost a race with a concurrent signup for the same email.
        Err(RepositoryError::AlreadyExists { .. }) => return Err(CoreError::UserExists.into()),
        Err(e) => return Err(e.into()),
    }

    tracing::info!(user_id = %user.id, "User signed up");

    let token = issue_token(&user, &state.config, Utc::now())?;
    Ok(Json(TokenResponse { token }))
}

async fn login(
    State(state): State<AuthState>,
    JsonBody(req): JsonBody<LoginRequest>,
) -> Result<Json<TokenResponse>, AuthError> {
    validate_login(&req)?;

    let user = state
        .users
        .get_user_by_email(&normalize_email(&req.email))
        .await?
        .ok_or(CoreError::InvalidCredentials)?;

    if !verify_password(&req.password, &user.password_hash).await? {
        tracing::debug!(user_id = %user.id, "Password mismatch");
        return Err(CoreError::InvalidCredentials.into());
    }

    tracing::info!(user_id = %user.id, "User logged in");

    let token = issue_token(&user, &state.config, Utc::now())?;
    Ok(Json(TokenResponse { token }))
}

async fn current_user(
    State(state): State<AuthState>,
    CurrentUser(token_user): CurrentUser,
) -> Result<Json<PublicUser>, AuthError> {
    // A valid token for a user that no longer exists is treated as invalid.
    let user = state
        .users
        .get_user(token_user.id)
        .await?
        .ok_or(CoreError::InvalidToken)?;

    Ok(Json(PublicUser::from(&user)))
}
