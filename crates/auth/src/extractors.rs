//! Axum extractors for authentication.

use axum::{
    body::Bytes,
    extract::{FromRef, FromRequest, FromRequestParts, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        request::Parts,
        HeaderMap,
    },
    Json,
};
use blogstack_core::auth::{AuthError as CoreError, TokenUser};
use serde::de::DeserializeOwned;

use crate::error::AuthError;
use crate::token::verify_token;
use crate::AuthState;

/// Header carrying the token.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Extractor for the authenticated user. Rejects with 401 if the token is
/// missing or invalid.
///
/// Only the token is checked; the user record is not loaded.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub TokenUser);

impl<S> FromRequestParts<S> for CurrentUser
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);

        let token = token_from_headers(&parts.headers).ok_or(CoreError::MissingToken)?;
        let claims = verify_token(token, &auth_state.config)?;

        Ok(CurrentUser(claims.user))
    }
}

/// `x-auth-token` first, then `Authorization: Bearer`.
fn token_from_headers(headers: &HeaderMap) -> Option<&str> {
    if let Some(value) = headers.get(TOKEN_HEADER) {
        return value.to_str().ok().map(str::trim).filter(|t| !t.is_empty());
    }

    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// JSON request body whose rejections are reported as [`AuthError`].
///
/// An empty body or a non-JSON content type yields `T::default()`, so the
/// handler's validation reports the missing fields.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = has_json_content_type(req.headers());
        let body = Bytes::from_request(req, state)
            .await
            .map_err(|e| AuthError::Body {
                status: e.status(),
                message: e.body_text(),
            })?;

        if !json || body.is_empty() {
            return Ok(JsonBody(T::default()));
        }

        let Json(value) = Json::<T>::from_bytes(&body).map_err(|e| AuthError::Body {
            status: e.status(),
            message: e.body_text(),
        })?;
        Ok(JsonBody(value))
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(|essence| {
            let essence = essence.trim().to_ascii_lowercase();
            essence == "application/json" || essence.ends_with("+json")
        })
        .unwrap_or(false)
}
