//! API request types for blog operations.
//!
//! These types are shared between the server and client for type-safe API communication.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::operations::validate_blog;
use super::types::Blog;
use crate::serde::deserialize_lenient_u64;
use crate::validation::ValidationErrors;

/// Request payload for creating a blog.
///
/// Missing fields deserialize to empty strings so that they surface as
/// validation errors rather than parse failures.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBlogRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl CreateBlogRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks that title and content are present.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_blog(&self.title, &self.content)
    }

    /// Converts into a new blog written by `author`.
    pub fn into_blog(self, author: Uuid) -> Blog {
        Blog::new(self.title, self.content, author)
    }
}

/// Request payload for updating a blog.
///
/// Title and content are both required, as on create; images are
/// replaced only when new ones are supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBlogRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

impl UpdateBlogRequest {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Checks that title and content are present.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        validate_blog(&self.title, &self.content)
    }

    /// Applies the update to `blog` and returns the image URLs it replaced.
    ///
    /// A new cover replaces the old one; new content images replace all of
    /// the old content images. The caller is responsible for deleting the
    /// returned URLs from the image store.
    pub fn apply_to(
        self,
        blog: &mut Blog,
        cover_image: Option<String>,
        content_images: Option<Vec<String>>,
    ) -> Vec<String> {
        let mut replaced = Vec::new();

        blog.title = self.title.trim().to_string();
        blog.content = self.content;

        if let Some(cover) = cover_image {
            let old = std::mem::replace(&mut blog.cover_image, cover);
            if !old.is_empty() {
                replaced.push(old);
            }
        }

        if let Some(images) = content_images {
            let old = std::mem::replace(&mut blog.content_images, images);
            replaced.extend(old);
        }

        blog.touch();
        replaced
    }
}

/// Query parameters for listing blogs (`?page=&limit=`).
///
/// Values that don't parse as positive integers fall back to defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListBlogsQuery {
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub page: Option<u64>,
    #[serde(
        default,
        deserialize_with = "deserialize_lenient_u64",
        skip_serializing_if = "Option::is_none"
    )]
    pub limit: Option<u64>,
}

impl ListBlogsQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u64) -> Self {
        self.page = Some(page);
        self
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }
}
