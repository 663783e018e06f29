use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::User;

/// A blog post document.
///
/// Field names on the wire follow the document shape the web client expects:
/// `_id`, `coverImage`, `contentImages`, `createdAt`, `updatedAt`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Blog {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    /// URL or path of the cover image, empty when there is none.
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub content_images: Vec<String>,
    /// ID of the user who wrote the post.
    pub author: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Blog {
    /// Creates a new blog with a fresh ID and timestamps.
    ///
    /// The title is trimmed.
    pub fn new(title: impl Into<String>, content: impl Into<String>, author: Uuid) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            title: title.into().trim().to_string(),
            content: content.into(),
            cover_image: String::new(),
            content_images: Vec::new(),
            author,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the cover image.
    pub fn with_cover_image(mut self, url: impl Into<String>) -> Self {
        self.cover_image = url.into();
        self
    }

    /// Sets the content images.
    pub fn with_content_images(mut self, urls: Vec<String>) -> Self {
        self.content_images = urls;
        self
    }

    /// Sets a specific ID (useful for testing).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    /// Sets a specific creation time (useful for testing ordering).
    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self.updated_at = created_at;
        self
    }

    /// Returns true if `user_id` wrote this post.
    pub fn is_authored_by(&self, user_id: Uuid) -> bool {
        self.author == user_id
    }

    /// All image URLs attached to this post, cover first.
    pub fn image_urls(&self) -> Vec<&str> {
        let mut urls = Vec::with_capacity(self.content_images.len() + 1);
        if !self.cover_image.is_empty() {
            urls.push(self.cover_image.as_str());
        }
        urls.extend(self.content_images.iter().map(String::as_str));
        urls
    }

    /// Refreshes `updated_at`, called on every save.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// The author projection embedded in API responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl From<&User> for AuthorSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

/// A blog with its author populated.
///
/// `author` is `None` when the referenced user no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub content_images: Vec<String>,
    pub author: Option<AuthorSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BlogView {
    /// Builds the view from a blog and its (possibly missing) author.
    pub fn new(blog: Blog, author: Option<AuthorSummary>) -> Self {
        Self {
            id: blog.id,
            title: blog.title,
            content: blog.content,
            cover_image: blog.cover_image,
            content_images: blog.content_images,
            author,
            created_at: blog.created_at,
            updated_at: blog.updated_at,
        }
    }
}

/// One page of blogs, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPage {
    pub blogs: Vec<BlogView>,
    pub current_page: u64,
    pub total_pages: u64,
    pub total_blogs: u64,
}
