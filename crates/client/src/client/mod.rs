//! HTTP client for the blogstack API.

pub mod auth;
pub mod blogs;
pub mod health;

use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use url::Url;

use crate::error::{ClientError, Result};

/// Header the server reads the token from.
pub const TOKEN_HEADER: &str = "x-auth-token";

/// Default server address.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

/// HTTP client for the blogstack API.
#[derive(Debug, Clone)]
pub struct BlogstackClient {
    client: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl BlogstackClient {
    /// Create a new client with the given base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: Url::parse(base_url)?,
            token: None,
        })
    }

    /// Create from environment (BLOGSTACK_URL or default).
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("BLOGSTACK_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::new(&base_url)
    }

    /// Attach a token sent with authenticated requests.
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Build a URL for an endpoint.
    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    /// Adds the token header, failing before any request is sent when
    /// there is no token.
    fn authorized(&self, builder: RequestBuilder) -> Result<RequestBuilder> {
        let token = self.token.as_deref().ok_or(ClientError::NotAuthenticated)?;
        Ok(builder.header(TOKEN_HEADER, token))
    }

    /// Handle error responses.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(ClientError::from);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(&body);
        Err(match status {
            StatusCode::NOT_FOUND => ClientError::NotFound(message),
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized(message),
            _ => ClientError::ServerError {
                status: status.as_u16(),
                message,
            },
        })
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    #[serde(default)]
    errors: Vec<FieldMessage>,
}

#[derive(Deserialize)]
struct FieldMessage {
    msg: String,
}

/// Extracts a readable message from an error body.
///
/// Understands both `{"message": ...}` and `{"errors": [{"msg": ...}]}`;
/// anything else is returned as-is.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            message: Some(message),
            ..
        }) => message,
        Ok(ErrorBody { errors, .. }) if !errors.is_empty() => errors
            .into_iter()
            .map(|e| e.msg)
            .collect::<Vec<_>>()
            .join(", "),
        _ if body.trim().is_empty() => "Unknown error".to_string(),
        _ => body.trim().to_string(),
    }
}
