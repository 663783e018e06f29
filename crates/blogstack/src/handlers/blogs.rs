//! Blog CRUD handlers.
//!
//! Reads are public; writes require a token, and update/delete are limited
//! to the post's author. Image files are stored before the document is
//! written and cleaned up again if the write fails.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use blogstack_auth::CurrentUser;
use blogstack_core::blog::{
    AuthorSummary, Blog, BlogError, BlogPage, BlogView, ListBlogsQuery, Pagination,
};
use blogstack_core::upload::{ImageField, ImageSet, ImageStore};
use serde_json::{json, Value};
use uuid::Uuid;

use super::submission::BlogSubmission;
use crate::{handlers::AppError, state::AppState, uploads::delete_images};

/// URLs of the images stored for one submission.
#[derive(Debug, Default)]
struct StoredImages {
    cover: Option<String>,
    content: Vec<String>,
}

impl StoredImages {
    fn urls(&self) -> impl Iterator<Item = &str> {
        self.cover.iter().chain(self.content.iter()).map(String::as_str)
    }
}

/// Stores every image in the set. On failure, the images already stored
/// for this set are deleted again.
async fn store_images(store: &dyn ImageStore, images: &ImageSet) -> Result<StoredImages, BlogError> {
    let mut stored = StoredImages::default();

    let uploads = images.cover.iter().chain(images.content.iter());
    for upload in uploads {
        match store.store(upload).await {
            Ok(url) => match upload.field {
                ImageField::Cover => stored.cover = Some(url),
                ImageField::Content => stored.content.push(url),
            },
            Err(e) => {
                delete_images(store, stored.urls()).await;
                return Err(e.into());
            }
        }
    }

    Ok(stored)
}

/// Unknown and malformed ids are both "not found".
fn parse_blog_id(id: &str) -> Result<Uuid, BlogError> {
    Uuid::parse_str(id).map_err(|_| BlogError::NotFound)
}

async fn find_blog(state: &AppState, id: &str) -> Result<Blog, BlogError> {
    let id = parse_blog_id(id)?;
    state.blogs.get_blog(id).await?.ok_or(BlogError::NotFound)
}

/// Loads a blog the current user is allowed to modify.
async fn find_own_blog(state: &AppState, id: &str, user_id: Uuid) -> Result<Blog, BlogError> {
    let blog = find_blog(state, id).await?;
    if !blog.is_authored_by(user_id) {
        tracing::warn!(blog_id = %blog.id, %user_id, "User is not the author");
        return Err(BlogError::NotAuthorized);
    }
    Ok(blog)
}

/// Populates the author of each blog with a single user lookup.
async fn populate_authors(state: &AppState, blogs: Vec<Blog>) -> Result<Vec<BlogView>, BlogError> {
    let mut ids: Vec<Uuid> = blogs.iter().map(|b| b.author).collect();
    ids.sort_unstable();
    ids.dedup();

    let authors: HashMap<Uuid, AuthorSummary> = state
        .users
        .get_users(&ids)
        .await?
        .iter()
        .map(|user| (user.id, AuthorSummary::from(user)))
        .collect();

    Ok(blogs
        .into_iter()
        .map(|blog| {
            let author = authors.get(&blog.author).cloned();
            BlogView::new(blog, author)
        })
        .collect())
}

async fn populate_author(state: &AppState, blog: Blog) -> Result<BlogView, BlogError> {
    let author = state
        .users
        .get_user(blog.author)
        .await?
        .as_ref()
        .map(AuthorSummary::from);
    Ok(BlogView::new(blog, author))
}

/// List blogs, newest first (GET /api/blogs).
pub async fn list_blogs(
    State(state): State<AppState>,
    Query(query): Query<ListBlogsQuery>,
) -> Result<Json<BlogPage>, AppError> {
    let pagination = Pagination::from_query(query.page, query.limit);

    let (blogs, total) = tokio::try_join!(
        state.blogs.list_blogs(pagination.skip(), pagination.limit),
        state.blogs.count_blogs(),
    )
    .map_err(BlogError::from)?;

    let blogs = populate_authors(&state, blogs).await?;

    Ok(Json(BlogPage {
        blogs,
        current_page: pagination.page,
        total_pages: pagination.total_pages(total),
        total_blogs: total,
    }))
}

/// Get a single blog (GET /api/blogs/{id}).
pub async fn get_blog(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<BlogView>, AppError> {
    let blog = find_blog(&state, &id).await?;
    Ok(Json(populate_author(&state, blog).await?))
}

/// Create a blog (POST /api/blogs).
pub async fn create_blog(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    submission: BlogSubmission,
) -> Result<Json<BlogView>, AppError> {
    let request = submission.create_request();
    request.validate().map_err(BlogError::from)?;

    let stored = store_images(state.images.as_ref(), &submission.images).await?;

    let mut blog = request.into_blog(user.id);
    if let Some(cover) = stored.cover.clone() {
        blog.cover_image = cover;
    }
    blog.content_images = stored.content.clone();

    if let Err(e) = state.blogs.create_blog(&blog).await {
        delete_images(state.images.as_ref(), stored.urls()).await;
        return Err(BlogError::from(e).into());
    }

    tracing::info!(
        blog_id = %blog.id,
        author = %user.id,
        images = submission.images.len(),
        "Blog created"
    );

    Ok(Json(populate_author(&state, blog).await?))
}

/// Update a blog (PUT /api/blogs/{id}).
///
/// New images replace the old ones, which are then deleted from the store.
pub async fn update_blog(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
    submission: BlogSubmission,
) -> Result<Json<BlogView>, AppError> {
    let request = submission.update_request();
    request.validate().map_err(BlogError::from)?;

    let mut blog = find_own_blog(&state, &id, user.id).await?;

    let stored = store_images(state.images.as_ref(), &submission.images).await?;
    let new_content = if submission.images.content.is_empty() {
        None
    } else {
        Some(stored.content.clone())
    };

    let replaced = request.apply_to(&mut blog, stored.cover.clone(), new_content);

    if let Err(e) = state.blogs.update_blog(&blog).await {
        delete_images(state.images.as_ref(), stored.urls()).await;
        return Err(BlogError::from(e).into());
    }

    delete_images(state.images.as_ref(), &replaced).await;

    tracing::info!(blog_id = %blog.id, replaced = replaced.len(), "Blog updated");

    Ok(Json(populate_author(&state, blog).await?))
}

/// Delete a blog and its images (DELETE /api/blogs/{id}).
pub async fn delete_blog(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    let blog = find_own_blog(&state, &id, user.id).await?;

    delete_images(state.images.as_ref(), blog.image_urls()).await;
    state
        .blogs
        .delete_blog(blog.id)
        .await
        .map_err(BlogError::from)?;

    tracing::info!(blog_id = %blog.id, "Blog deleted");

    Ok(Json(json!({ "message": "Blog removed" })))
}
