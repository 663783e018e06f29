use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blogstack_core::auth::AuthError as CoreError;
use serde_json::json;
use thiserror::Error;

/// Auth errors for the blogstack_auth crate.
///
/// Wraps the core `AuthError` and adds the failures that only happen at
/// the I/O edge.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The request body could not be read or parsed.
    #[error("{message}")]
    Body { status: StatusCode, message: String },

    /// Blocking task (bcrypt) panicked or was cancelled.
    #[error("background task failed: {0}")]
    Task(String),
}

impl From<blogstack_core::storage::RepositoryError> for AuthError {
    fn from(err: blogstack_core::storage::RepositoryError) -> Self {
        Self::Core(CoreError::Storage(err.to_string()))
    }
}

impl From<blogstack_core::validation::ValidationErrors> for AuthError {
    fn from(err: blogstack_core::validation::ValidationErrors) -> Self {
        Self::Core(CoreError::Validation(err))
    }
}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Core(core) => match core {
                CoreError::MissingToken | CoreError::InvalidToken => StatusCode::UNAUTHORIZED,
                CoreError::InvalidCredentials
                | CoreError::UserExists
                | CoreError::Validation(_) => StatusCode::BAD_REQUEST,
                CoreError::Hashing(_) | CoreError::Signing(_) | CoreError::Storage(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            AuthError::Body { status, .. } => *status,
            AuthError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            AuthError::Core(CoreError::Validation(errors)) => json!({ "errors": errors.errors }),
            err if status.is_server_error() => {
                tracing::error!(error = %err, "Auth request failed");
                json!({ "message": "Server Error" })
            }
            err => json!({ "message": err.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
