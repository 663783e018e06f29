//! In-memory repository implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use blogstack_core::auth::User;
use blogstack_core::blog::Blog;
use blogstack_core::storage::{BlogRepository, RepositoryError, Result, UserRepository};

/// In-memory storage backend.
///
/// Data is not persisted and will be lost when the repository is dropped.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    blogs: Arc<RwLock<HashMap<Uuid, Blog>>>,
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryRepository {
    /// Creates a new empty in-memory repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BlogRepository for InMemoryRepository {
    async fn get_blog(&self, id: Uuid) -> Result<Option<Blog>> {
        let blogs = self.blogs.read().await;
        Ok(blogs.get(&id).cloned())
    }

    async fn list_blogs(&self, skip: u64, limit: u64) -> Result<Vec<Blog>> {
        let blogs = self.blogs.read().await;
        let mut sorted: Vec<&Blog> = blogs.values().collect();
        sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(sorted
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn count_blogs(&self) -> Result<u64> {
        let blogs = self.blogs.read().await;
        Ok(blogs.len() as u64)
    }

    async fn create_blog(&self, blog: &Blog) -> Result<()> {
        let mut blogs = self.blogs.write().await;
        if blogs.contains_key(&blog.id) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "Blog",
                id: blog.id.to_string(),
            });
        }
        blogs.insert(blog.id, blog.clone());
        Ok(())
    }

    async fn update_blog(&self, blog: &Blog) -> Result<()> {
        let mut blogs = self.blogs.write().await;
        match blogs.get_mut(&blog.id) {
            Some(existing) => {
                *existing = blog.clone();
                Ok(())
            }
            None => Err(RepositoryError::blog_not_found(blog.id)),
        }
    }

    async fn delete_blog(&self, id: Uuid) -> Result<()> {
        let mut blogs = self.blogs.write().await;
        if blogs.remove(&id).is_none() {
            return Err(RepositoryError::blog_not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<User>> {
        let users = self.users.read().await;
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.email == user.email) {
            return Err(RepositoryError::AlreadyExists {
                entity_type: "User",
                id: user.email.clone(),
            });
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}
