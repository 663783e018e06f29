//! HS256 JWT issue and verification.

use blogstack_core::auth::{calculate_expiry, AuthError as CoreError, Claims, User};
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::config::AuthConfig;
use crate::error::AuthError;

/// Signs a token for `user`, valid for the configured TTL from `now`.
pub fn issue_token(user: &User, config: &AuthConfig, now: DateTime<Utc>) -> Result<String, AuthError> {
    let ttl = chrono::Duration::from_std(config.token_ttl)
        .map_err(|e| CoreError::Signing(e.to_string()))?;
    let claims = Claims::for_user(user, now, calculate_expiry(now, ttl));

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| CoreError::Signing(e.to_string()).into())
}

/// Verifies signature and expiry, returning the claims.
pub fn verify_token(token: &str, config: &AuthConfig) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| {
        tracing::debug!(error = %e, "Rejected token");
        CoreError::InvalidToken.into()
    })
}
