//! Health check operations.

use serde::{Deserialize, Serialize};

use super::BlogstackClient;
use crate::error::Result;

/// Body of `/readyz`.
#[derive(Debug, Serialize, Deserialize)]
pub struct Readiness {
    pub healthy: bool,
    pub storage: String,
    pub uploads: String,
}

impl BlogstackClient {
    /// Check storage and image store readiness.
    ///
    /// A 503 still carries a readiness body, so it is decoded rather than
    /// treated as an error.
    pub async fn readiness(&self) -> Result<Readiness> {
        let response = self.client.get(self.url("/readyz")?).send().await?;
        if response.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Ok(response.json().await?);
        }
        self.handle_response(response).await
    }
}
