use axum::{
    extract::rejection::{BytesRejection, FormRejection, JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use blogstack_core::blog::BlogError;
use blogstack_core::storage::RepositoryError;
use blogstack_core::upload::UploadError;
use serde_json::json;

/// Handler error. Known domain errors map to their status and JSON body;
/// anything else is a 500 with the details only logged.
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

fn message(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "message": message.into() }))).into_response()
}

fn server_error(err: &dyn std::fmt::Display) -> Response {
    tracing::error!(error = %err, "Request failed");
    message(StatusCode::INTERNAL_SERVER_ERROR, "Server Error")
}

/// Missing (404) and duplicate (409) documents echo their message. Storage
/// failures are opaque: 503 when the database is unreachable, 500 otherwise.
fn repository_error_response(err: &RepositoryError) -> Response {
    if err.is_client_error() {
        let status = if err.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::CONFLICT
        };
        return message(status, err.to_string());
    }

    match err {
        RepositoryError::ConnectionFailed(_) => {
            tracing::error!(error = %err, "Storage unavailable");
            message(StatusCode::SERVICE_UNAVAILABLE, "Server Error")
        }
        _ => server_error(err),
    }
}

fn upload_error_response(err: &UploadError) -> Response {
    if err.is_client_error() {
        tracing::warn!(error = %err, "Rejected upload");
        message(StatusCode::BAD_REQUEST, err.to_string())
    } else {
        server_error(err)
    }
}

fn blog_error_response(err: &BlogError) -> Response {
    match err {
        BlogError::NotFound => message(StatusCode::NOT_FOUND, err.to_string()),
        BlogError::NotAuthorized => message(StatusCode::UNAUTHORIZED, err.to_string()),
        BlogError::Validation(errors) => {
            (StatusCode::BAD_REQUEST, Json(json!({ "errors": errors.errors }))).into_response()
        }
        BlogError::Upload(upload) => upload_error_response(upload),
        BlogError::Repository(repo) => repository_error_response(repo),
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(err) = self.0.downcast_ref::<BlogError>() {
            return blog_error_response(err);
        }
        if let Some(err) = self.0.downcast_ref::<UploadError>() {
            return upload_error_response(err);
        }
        if let Some(err) = self.0.downcast_ref::<RepositoryError>() {
            return repository_error_response(err);
        }
        if let Some(rejection) = self.0.downcast_ref::<JsonRejection>() {
            return message(rejection.status(), rejection.body_text());
        }
        if let Some(rejection) = self.0.downcast_ref::<FormRejection>() {
            return message(rejection.status(), rejection.body_text());
        }
        if let Some(rejection) = self.0.downcast_ref::<BytesRejection>() {
            return message(rejection.status(), rejection.body_text());
        }

        server_error(&self.0)
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}
