use std::time::Duration;

/// Used when `JWT_SECRET` is unset. Fine for local development only.
const DEV_JWT_SECRET: &str = "blogstack-dev-secret";

/// Auth configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
            token_ttl: Duration::from_secs(24 * 60 * 60),
            bcrypt_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl AuthConfig {
    /// Load from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JWT_SECRET`: HMAC secret for signing tokens (default: a development secret)
    /// - `TOKEN_TTL_HOURS`: Token lifetime in hours (default: 24)
    /// - `BCRYPT_COST`: bcrypt work factor, 4..=31 (default: 12)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let jwt_secret = match std::env::var("JWT_SECRET") {
            Ok(secret) if !secret.is_empty() => secret,
            _ => {
                tracing::warn!("JWT_SECRET is not set, using the development secret");
                defaults.jwt_secret
            }
        };

        let token_ttl = std::env::var("TOKEN_TTL_HOURS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|hours| *hours > 0)
            .map(|hours| Duration::from_secs(hours * 60 * 60))
            .unwrap_or(defaults.token_ttl);

        let bcrypt_cost = std::env::var("BCRYPT_COST")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|cost| (4..=31).contains(cost))
            .unwrap_or(defaults.bcrypt_cost);

        Self {
            jwt_secret,
            token_ttl,
            bcrypt_cost,
        }
    }

    /// Configuration for tests: cheap hashing, fixed secret.
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: "test-secret".to_string(),
            token_ttl: Duration::from_secs(60 * 60),
            bcrypt_cost: 4,
        }
    }
}
