//! Token persistence and payload decoding.
//!
//! The token file holds the raw JWT. Decoding reads the payload without
//! verifying the signature; the server remains the authority on validity.

use std::path::{Path, PathBuf};

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use blogstack_core::auth::Claims;
use chrono::{DateTime, Utc};

use crate::error::{ClientError, Result};

const TOKEN_FILE_NAME: &str = "token";

/// Where the signed-in token lives between invocations.
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `$HOME/.blogstack/token`, or `.blogstack/token` when HOME is unset.
    pub fn default_path() -> PathBuf {
        std::env::var_os("HOME")
            .map(PathBuf::from)
            .unwrap_or_default()
            .join(".blogstack")
            .join(TOKEN_FILE_NAME)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored token, if any.
    pub fn load(&self) -> Result<Option<String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                Ok((!token.is_empty()).then(|| token.to_string()))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, token)?;
        Ok(())
    }

    /// Removes the stored token. Returns false when there was none.
    pub fn clear(&self) -> Result<bool> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

/// Decodes the claims segment of a JWT.
pub fn decode_claims(token: &str) -> Result<Claims> {
    let mut segments = token.split('.');
    let payload = match (segments.next(), segments.next(), segments.next(), segments.next()) {
        (Some(_), Some(payload), Some(_), None) => payload,
        _ => return Err(ClientError::InvalidToken("expected three segments".into())),
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| ClientError::InvalidToken(e.to_string()))?;

    serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidToken(e.to_string()))
}

/// Whether the claims have expired at `now`.
pub fn is_expired(claims: &Claims, now: DateTime<Utc>) -> bool {
    claims.exp <= now.timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogstack_core::auth::TokenUser;
    use uuid::Uuid;

    fn token_for(claims: &Claims) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
        format!("{header}.{payload}.signature")
    }

    fn claims(exp: i64) -> Claims {
        Claims {
            user: TokenUser {
                id: Uuid::new_v4(),
                name: "Ada".into(),
            },
            iat: 0,
            exp,
        }
    }

    #[test]
    fn test_decode_claims() {
        let expected = claims(2_000_000_000);

        let decoded = decode_claims(&token_for(&expected)).unwrap();

        assert_eq!(decoded, expected);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        for token in ["", "abc", "a.b", "a.b.c.d", "a.!!!.c", "a.e30.c"] {
            assert!(
                matches!(decode_claims(token), Err(ClientError::InvalidToken(_))),
                "{token:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_is_expired() {
        let now = Utc::now();

        assert!(is_expired(&claims(now.timestamp() - 1), now));
        assert!(!is_expired(&claims(now.timestamp() + 60), now));
    }

    #[test]
    fn test_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path().join("nested").join("token"));

        assert_eq!(store.load().unwrap(), None);

        store.save("abc.def.ghi").unwrap();
        assert_eq!(store.load().unwrap().as_deref(), Some("abc.def.ghi"));

        assert!(store.clear().unwrap());
        assert!(!store.clear().unwrap());
        assert_eq!(store.load().unwrap(), None);
    }
}
