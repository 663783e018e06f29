//! Blog API operations.

use std::path::{Path, PathBuf};

use blogstack_core::{
    blog::{BlogPage, BlogView, CreateBlogRequest},
    upload::{extension, ImageField, MAX_CONTENT_IMAGES, MAX_FILE_SIZE},
};
use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};

use super::BlogstackClient;
use crate::error::{ClientError, Result};

/// Title, content and optional images for create and update.
#[derive(Debug, Clone, Default)]
pub struct BlogForm {
    pub title: String,
    pub content: String,
    pub cover: Option<PathBuf>,
    pub images: Vec<PathBuf>,
}

impl BlogForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    fn has_files(&self) -> bool {
        self.cover.is_some() || !self.images.is_empty()
    }

    /// Builds the multipart body, reading every file from disk.
    async fn into_multipart(self) -> Result<Form> {
        if self.images.len() > MAX_CONTENT_IMAGES {
            return Err(ClientError::InvalidInput(format!(
                "at most {MAX_CONTENT_IMAGES} content images are allowed"
            )));
        }

        let mut form = Form::new()
            .text("title", self.title)
            .text("content", self.content);

        if let Some(cover) = &self.cover {
            form = form.part(ImageField::Cover.as_str(), image_part(cover).await?);
        }
        for image in &self.images {
            form = form.part(ImageField::Content.as_str(), image_part(image).await?);
        }

        Ok(form)
    }
}

/// Body of `DELETE /api/blogs/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// MIME type for an image path, judged by its extension.
pub fn image_content_type(path: &Path) -> Result<&'static str> {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    match extension(name).as_str() {
        ".jpg" | ".jpeg" => Ok("image/jpeg"),
        ".png" => Ok("image/png"),
        ".gif" => Ok("image/gif"),
        _ => Err(ClientError::InvalidInput(format!(
            "{}: only jpeg, jpg, png and gif images can be uploaded",
            path.display()
        ))),
    }
}

async fn image_part(path: &Path) -> Result<Part> {
    let content_type = image_content_type(path)?;
    let data = tokio::fs::read(path).await?;
    if data.len() > MAX_FILE_SIZE {
        return Err(ClientError::InvalidInput(format!(
            "{}: file is larger than 5MB",
            path.display()
        )));
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Part::bytes(data)
        .file_name(file_name)
        .mime_str(content_type)?)
}

impl BlogstackClient {
    /// List one page of blogs, newest first.
    pub async fn list_blogs(&self, page: Option<u64>, limit: Option<u64>) -> Result<BlogPage> {
        let mut query = Vec::new();
        if let Some(page) = page {
            query.push(("page", page));
        }
        if let Some(limit) = limit {
            query.push(("limit", limit));
        }

        let response = self
            .client
            .get(self.url("/api/blogs")?)
            .query(&query)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Get blog by ID.
    pub async fn get_blog(&self, id: &str) -> Result<BlogView> {
        let response = self
            .client
            .get(self.url(&format!("/api/blogs/{id}"))?)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// Create a blog. Sends multipart when images are attached, JSON otherwise.
    pub async fn create_blog(&self, form: BlogForm) -> Result<BlogView> {
        let request = self.authorized(self.client.post(self.url("/api/blogs")?))?;
        let response = send_form(request, form).await?;
        self.handle_response(response).await
    }

    /// Update a blog. New images replace the old ones.
    pub async fn update_blog(&self, id: &str, form: BlogForm) -> Result<BlogView> {
        let request =
            self.authorized(self.client.put(self.url(&format!("/api/blogs/{id}"))?))?;
        let response = send_form(request, form).await?;
        self.handle_response(response).await
    }

    /// Delete blog by ID.
    pub async fn delete_blog(&self, id: &str) -> Result<MessageResponse> {
        let request =
            self.authorized(self.client.delete(self.url(&format!("/api/blogs/{id}"))?))?;
        let response = request.send().await?;
        self.handle_response(response).await
    }
}

async fn send_form(
    request: reqwest::RequestBuilder,
    form: BlogForm,
) -> Result<reqwest::Response> {
    let request = if form.has_files() {
        request.multipart(form.into_multipart().await?)
    } else {
        request.json(&CreateBlogRequest::new(form.title, form.content))
    };
    Ok(request.send().await?)
}
