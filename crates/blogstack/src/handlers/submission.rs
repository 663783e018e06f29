//! Extractor for the blog create/update body.
//!
//! Accepts `multipart/form-data` (text fields plus `coverImage` and
//! `contentImages` files), JSON, or urlencoded forms. Files are buffered in
//! memory and checked against the upload policy before anything is stored.
//! An empty body or any other content type carries no fields, so it fails
//! validation like a body with both fields missing.

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, FromRef, FromRequest, Multipart, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form, Json,
};
use blogstack_core::blog::{CreateBlogRequest, UpdateBlogRequest};
use blogstack_core::upload::{ImageSet, ImageUpload, UploadError, UploadPolicy};
use bytes::BytesMut;
use serde::Deserialize;

use crate::handlers::AppError;
use crate::state::AppState;

/// Text fields of a blog body. Missing fields become empty strings so they
/// surface as validation errors.
#[derive(Debug, Default, Deserialize)]
struct TextFields {
    #[serde(default)]
    title: String,
    #[serde(default)]
    content: String,
}

/// A parsed blog body: text fields plus any attached images.
#[derive(Debug, Default)]
pub struct BlogSubmission {
    pub title: String,
    pub content: String,
    pub images: ImageSet,
}

impl BlogSubmission {
    pub fn create_request(&self) -> CreateBlogRequest {
        CreateBlogRequest::new(self.title.clone(), self.content.clone())
    }

    pub fn update_request(&self) -> UpdateBlogRequest {
        UpdateBlogRequest::new(self.title.clone(), self.content.clone())
    }
}

impl From<TextFields> for BlogSubmission {
    fn from(fields: TextFields) -> Self {
        Self {
            title: fields.title,
            content: fields.content,
            images: ImageSet::new(),
        }
    }
}

impl<S> FromRequest<S> for BlogSubmission
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let policy = AppState::from_ref(state).upload_policy;

        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| UploadError::Malformed(e.body_text()))?;
            Ok(read_multipart(multipart, &policy).await?)
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(fields) = Form::<TextFields>::from_request(req, state).await?;
            Ok(fields.into())
        } else if is_json(&content_type) {
            let body = Bytes::from_request(req, state).await?;
            if body.is_empty() {
                return Ok(Self::default());
            }
            let Json(fields) = Json::<TextFields>::from_bytes(&body)?;
            Ok(fields.into())
        } else {
            tracing::debug!(content_type = %content_type, "No readable blog fields in body");
            Ok(Self::default())
        }
    }
}

fn is_json(content_type: &str) -> bool {
    let essence = content_type.split(';').next().unwrap_or_default().trim();
    essence == "application/json" || essence.ends_with("+json")
}

fn multipart_error(err: MultipartError) -> UploadError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        UploadError::FileTooLarge
    } else {
        UploadError::Malformed(err.body_text())
    }
}

async fn read_multipart(
    mut multipart: Multipart,
    policy: &UploadPolicy,
) -> Result<BlogSubmission, UploadError> {
    let mut submission = BlogSubmission::default();

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or_default().to_string();

        let Some(file_name) = field.file_name().map(str::to_string) else {
            let value = field.text().await.map_err(multipart_error)?;
            match name.as_str() {
                "title" => submission.title = value,
                "content" => submission.content = value,
                other => tracing::debug!(field = other, "Ignoring unknown text field"),
            }
            continue;
        };

        // Browsers send an empty file part when no file was chosen.
        if file_name.is_empty() {
            continue;
        }

        let image_field = policy.check_field(&name)?;
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        policy.check_type(&file_name, &content_type)?;

        let mut data = BytesMut::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
            policy.check_size(data.len() + chunk.len())?;
            data.extend_from_slice(&chunk);
        }

        tracing::debug!(
            field = %image_field,
            file_name = %file_name,
            bytes = data.len(),
            "Received image"
        );

        submission.images.push(
            ImageUpload::new(image_field, file_name, content_type, data.freeze()),
            policy,
        )?;
    }

    Ok(submission)
}
