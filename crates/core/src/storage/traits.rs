use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::User;
use crate::blog::Blog;

use super::Result;

/// Repository for blog documents.
#[async_trait]
pub trait BlogRepository: Send + Sync {
    /// Gets a blog by its ID.
    async fn get_blog(&self, id: Uuid) -> Result<Option<Blog>>;

    /// Lists blogs newest first, skipping `skip` and returning at most `limit`.
    async fn list_blogs(&self, skip: u64, limit: u64) -> Result<Vec<Blog>>;

    /// Counts all blogs.
    async fn count_blogs(&self) -> Result<u64>;

    /// Creates a new blog.
    async fn create_blog(&self, blog: &Blog) -> Result<()>;

    /// Replaces an existing blog.
    async fn update_blog(&self, blog: &Blog) -> Result<()>;

    /// Deletes a blog by its ID.
    async fn delete_blog(&self, id: Uuid) -> Result<()>;

    /// Cheap round-trip used by readiness probes.
    async fn ping(&self) -> Result<()>;
}

/// Repository for user accounts.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Gets a user by their ID.
    async fn get_user(&self, id: Uuid) -> Result<Option<User>>;

    /// Gets a user by their (normalized) email address.
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;

    /// Gets the users with the given IDs. Unknown IDs are skipped.
    async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<User>>;

    /// Creates a new user. Fails with `AlreadyExists` on a duplicate email.
    async fn create_user(&self, user: &User) -> Result<()>;
}
