//! Authentication API operations.

use blogstack_core::auth::{LoginRequest, PublicUser, SignupRequest, TokenResponse};

use super::BlogstackClient;
use crate::error::Result;

impl BlogstackClient {
    /// Register a new account and return its token.
    pub async fn signup(&self, req: &SignupRequest) -> Result<TokenResponse> {
        let response = self
            .client
            .post(self.url("/api/auth/signup")?)
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Sign in and return a token.
    pub async fn login(&self, req: &LoginRequest) -> Result<TokenResponse> {
        let response = self
            .client
            .post(self.url("/api/auth/login")?)
            .json(req)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Fetch the signed-in user.
    pub async fn current_user(&self) -> Result<PublicUser> {
        let request = self.authorized(self.client.get(self.url("/api/auth/user")?))?;
        let response = request.send().await?;
        self.handle_response(response).await
    }
}
