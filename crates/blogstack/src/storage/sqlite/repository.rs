//! SQLite repository implementation.

use async_trait::async_trait;
use rusqlite::OptionalExtension;
use tokio_rusqlite::Connection;
use uuid::Uuid;

use blogstack_core::auth::User;
use blogstack_core::blog::Blog;
use blogstack_core::storage::{BlogRepository, RepositoryError, Result, UserRepository};

use super::conversions::{content_images_to_json, format_datetime, row_to_blog, row_to_user};
use super::error::map_tokio_rusqlite_error;
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based repository for blogs and users.
pub struct SqliteRepository {
    conn: Connection,
}

impl SqliteRepository {
    /// Opens (or creates) a file-based database and applies the schema.
    pub async fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(path)
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a repository over an in-memory database.
    #[cfg(test)]
    pub async fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            conn.execute_batch(schema::CREATE_TABLES)
                .map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::QueryFailed(e.to_string()))
    }
}

// ============================================================================
// BlogRepository implementation
// ============================================================================

#[async_trait]
impl BlogRepository for SqliteRepository {
    async fn get_blog(&self, id: Uuid) -> Result<Option<Blog>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_BLOG_BY_ID, [&id_str], row_to_blog)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Blog", id.to_string()))
    }

    async fn list_blogs(&self, skip: u64, limit: u64) -> Result<Vec<Blog>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let offset = i64::try_from(skip).unwrap_or(i64::MAX);

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(schema::SELECT_BLOGS_PAGE).map_err(wrap_err)?;
                let rows = stmt
                    .query_map([limit, offset], row_to_blog)
                    .map_err(wrap_err)?;

                let mut blogs = Vec::new();
                for row_result in rows {
                    blogs.push(row_result.map_err(wrap_err)?);
                }
                Ok(blogs)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Blog", "unknown"))
    }

    async fn count_blogs(&self) -> Result<u64> {
        let count: i64 = self
            .conn
            .call(|conn| {
                conn.query_row(schema::COUNT_BLOGS, [], |row| row.get(0))
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Blog", "unknown"))?;

        u64::try_from(count).map_err(|e| RepositoryError::InvalidData(e.to_string()))
    }

    async fn create_blog(&self, blog: &Blog) -> Result<()> {
        let id = blog.id.to_string();
        let title = blog.title.clone();
        let content = blog.content.clone();
        let cover_image = blog.cover_image.clone();
        let content_images = content_images_to_json(&blog.content_images)?;
        let author_id = blog.author.to_string();
        let created_at = format_datetime(&blog.created_at);
        let updated_at = format_datetime(&blog.updated_at);
        let blog_id = id.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_BLOG,
                    rusqlite::params![
                        id,
                        title,
                        content,
                        cover_image,
                        content_images,
                        author_id,
                        created_at,
                        updated_at
                    ],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Blog", blog_id))
    }

    async fn update_blog(&self, blog: &Blog) -> Result<()> {
        let id = blog.id.to_string();
        let title = blog.title.clone();
        let content = blog.content.clone();
        let cover_image = blog.cover_image.clone();
        let content_images = content_images_to_json(&blog.content_images)?;
        let updated_at = format_datetime(&blog.updated_at);
        let blog_id = blog.id;

        let changed = self
            .conn
            .call(move |conn| {
                conn.execute(
                    schema::UPDATE_BLOG,
                    rusqlite::params![id, title, content, cover_image, content_images, updated_at],
                )
                .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Blog", blog_id.to_string()))?;

        if changed == 0 {
            return Err(RepositoryError::blog_not_found(blog_id));
        }
        Ok(())
    }

    async fn delete_blog(&self, id: Uuid) -> Result<()> {
        let id_str = id.to_string();

        let changed = self
            .conn
            .call(move |conn| {
                conn.execute(schema::DELETE_BLOG, [&id_str])
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "Blog", id.to_string()))?;

        if changed == 0 {
            return Err(RepositoryError::blog_not_found(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        self.conn
            .call(|conn| {
                conn.query_row(schema::PING, [], |row| row.get::<_, i64>(0))
                    .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| RepositoryError::ConnectionFailed(e.to_string()))
    }
}

// ============================================================================
// UserRepository implementation
// ============================================================================

#[async_trait]
impl UserRepository for SqliteRepository {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>> {
        let id_str = id.to_string();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_USER_BY_ID, [&id_str], row_to_user)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.to_string();
        let email_for_err = email.clone();

        self.conn
            .call(move |conn| {
                conn.query_row(schema::SELECT_USER_BY_EMAIL, [&email], row_to_user)
                    .optional()
                    .map_err(wrap_err)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", email_for_err))
    }

    async fn get_users(&self, ids: &[Uuid]) -> Result<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<String> = ids.iter().map(Uuid::to_string).collect();
        let placeholders = vec!["?"; ids.len()].join(", ");
        let sql = format!(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id IN ({placeholders})"
        );

        self.conn
            .call(move |conn| {
                let mut stmt = conn.prepare(&sql).map_err(wrap_err)?;
                let rows = stmt
                    .query_map(rusqlite::params_from_iter(ids.iter()), row_to_user)
                    .map_err(wrap_err)?;

                let mut users = Vec::new();
                for row_result in rows {
                    users.push(row_result.map_err(wrap_err)?);
                }
                Ok(users)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", "unknown"))
    }

    async fn create_user(&self, user: &User) -> Result<()> {
        let id = user.id.to_string();
        let name = user.name.clone();
        let email = user.email.clone();
        let password_hash = user.password_hash.clone();
        let created_at = format_datetime(&user.created_at);
        let email_for_err = email.clone();

        self.conn
            .call(move |conn| {
                conn.execute(
                    schema::INSERT_USER,
                    rusqlite::params![id, name, email, password_hash, created_at],
                )
                .map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", email_for_err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    async fn setup() -> SqliteRepository {
        SqliteRepository::new_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_blog_round_trip_keeps_images() {
        let repo = setup().await;
        let blog = Blog::new("Title", "Body", Uuid::new_v4())
            .with_cover_image("/uploads/cover.png")
            .with_content_images(vec!["/uploads/a.png".into(), "/uploads/b.png".into()]);

        repo.create_blog(&blog).await.unwrap();
        let loaded = repo.get_blog(blog.id).await.unwrap().unwrap();

        assert_eq!(loaded.title, "Title");
        assert_eq!(loaded.cover_image, "/uploads/cover.png");
        assert_eq!(loaded.content_images, blog.content_images);
        assert_eq!(loaded.author, blog.author);
        assert_eq!(
            loaded.created_at.timestamp_micros(),
            blog.created_at.timestamp_micros()
        );
    }

    #[tokio::test]
    async fn test_get_missing_blog_is_none() {
        let repo = setup().await;
        assert!(repo.get_blog(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_blogs_newest_first() {
        let repo = setup().await;
        let now = Utc::now();
        for minutes in [5, 15, 0, 10] {
            let blog = Blog::new(format!("Post {minutes}"), "Body", Uuid::new_v4())
                .with_created_at(now - Duration::minutes(minutes));
            repo.create_blog(&blog).await.unwrap();
        }

        let page = repo.list_blogs(1, 2).await.unwrap();

        let titles: Vec<_> = page.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Post 5", "Post 10"]);
        assert_eq!(repo.count_blogs().await.unwrap(), 4);
    }

    #[tokio::test]
    async fn test_update_and_delete_blog() {
        let repo = setup().await;
        let mut blog = Blog::new("Title", "Body", Uuid::new_v4());
        repo.create_blog(&blog).await.unwrap();

        blog.title = "Edited".into();
        blog.content_images = vec!["/uploads/c.png".into()];
        repo.update_blog(&blog).await.unwrap();

        let loaded = repo.get_blog(blog.id).await.unwrap().unwrap();
        assert_eq!(loaded.title, "Edited");
        assert_eq!(loaded.content_images, vec!["/uploads/c.png".to_string()]);

        repo.delete_blog(blog.id).await.unwrap();
        assert!(repo.get_blog(blog.id).await.unwrap().is_none());
        assert!(repo.delete_blog(blog.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_update_missing_blog_is_not_found() {
        let repo = setup().await;
        let blog = Blog::new("Title", "Body", Uuid::new_v4());

        assert!(repo.update_blog(&blog).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_users() {
        let repo = setup().await;
        let ada = User::new("Ada", "ada@example.com", "hash-a");
        let bob = User::new("Bob", "bob@example.com", "hash-b");
        repo.create_user(&ada).await.unwrap();
        repo.create_user(&bob).await.unwrap();

        let by_email = repo.get_user_by_email("ada@example.com").await.unwrap();
        assert_eq!(by_email.map(|u| u.password_hash), Some("hash-a".to_string()));

        let by_id = repo.get_user(bob.id).await.unwrap().unwrap();
        assert_eq!(by_id.name, "Bob");

        let many = repo.get_users(&[ada.id, bob.id, Uuid::new_v4()]).await.unwrap();
        assert_eq!(many.len(), 2);
        assert!(repo.get_users(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_already_exists() {
        let repo = setup().await;
        repo.create_user(&User::new("Ada", "ada@example.com", "h"))
            .await
            .unwrap();

        let err = repo
            .create_user(&User::new("Ada 2", "ada@example.com", "h"))
            .await
            .unwrap_err();

        assert!(matches!(err, RepositoryError::AlreadyExists { entity_type: "User", .. }));
    }

    #[tokio::test]
    async fn test_ping() {
        assert!(setup().await.ping().await.is_ok());
    }
}
