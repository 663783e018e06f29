//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use blogstack_core::auth::User;
use blogstack_core::blog::Blog;
use blogstack_core::storage::RepositoryError;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::Row;
use uuid::Uuid;

/// Convert a SQLite row to a User.
///
/// Expected columns: id, name, email, password_hash, created_at
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(4)?;

    Ok(User {
        id: parse_uuid(0, &id)?,
        name: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        created_at: parse_datetime(4, &created_at)?,
    })
}

/// Convert a SQLite row to a Blog.
///
/// Expected columns: id, title, content, cover_image, content_images,
/// author_id, created_at, updated_at
pub fn row_to_blog(row: &Row) -> rusqlite::Result<Blog> {
    let id: String = row.get(0)?;
    let content_images: String = row.get(4)?;
    let author: String = row.get(5)?;
    let created_at: String = row.get(6)?;
    let updated_at: String = row.get(7)?;

    Ok(Blog {
        id: parse_uuid(0, &id)?,
        title: row.get(1)?,
        content: row.get(2)?,
        cover_image: row.get(3)?,
        content_images: json_to_content_images(&content_images)
            .map_err(|e| conversion_error(4, e))?,
        author: parse_uuid(5, &author)?,
        created_at: parse_datetime(6, &created_at)?,
        updated_at: parse_datetime(7, &updated_at)?,
    })
}

/// Serialize the content image list for the JSON column.
pub fn content_images_to_json(images: &[String]) -> Result<String, RepositoryError> {
    serde_json::to_string(images).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

pub fn json_to_content_images(json: &str) -> Result<Vec<String>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Format a DateTime for SQLite storage. Fixed-width so that text ordering
/// matches time ordering.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_uuid(column: usize, s: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(s).map_err(|e| conversion_error(column, e))
}

fn parse_datetime(column: usize, s: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_error(column, e))
}

fn conversion_error<E>(column: usize, err: E) -> rusqlite::Error
where
    E: std::error::Error + Send + Sync + 'static,
{
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(err))
}
