//! SQLite schema definitions and SQL query constants.

/// SQL statement to create all tables.
pub const CREATE_TABLES: &str = r#"
-- Users table
CREATE TABLE IF NOT EXISTS users (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,
    created_at TEXT NOT NULL
);

-- Blogs table; content_images is a JSON array of URLs
CREATE TABLE IF NOT EXISTS blogs (
    id TEXT PRIMARY KEY,
    title TEXT NOT NULL,
    content TEXT NOT NULL,
    cover_image TEXT NOT NULL DEFAULT '',
    content_images TEXT NOT NULL DEFAULT '[]',
    author_id TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_blogs_created_at ON blogs(created_at DESC);
CREATE INDEX IF NOT EXISTS idx_blogs_author_id ON blogs(author_id);
"#;

// User queries
pub const INSERT_USER: &str = r#"
INSERT INTO users (id, name, email, password_hash, created_at)
VALUES (?1, ?2, ?3, ?4, ?5)
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, name, email, password_hash, created_at
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_BY_EMAIL: &str = r#"
SELECT id, name, email, password_hash, created_at
FROM users
WHERE email = ?1
"#;

// Blog queries
pub const INSERT_BLOG: &str = r#"
INSERT INTO blogs (id, title, content, cover_image, content_images, author_id, created_at, updated_at)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
"#;

pub const SELECT_BLOG_BY_ID: &str = r#"
SELECT id, title, content, cover_image, content_images, author_id, created_at, updated_at
FROM blogs
WHERE id = ?1
"#;

/// Timestamps are RFC 3339 in UTC, so text order is chronological order.
pub const SELECT_BLOGS_PAGE: &str = r#"
SELECT id, title, content, cover_image, content_images, author_id, created_at, updated_at
FROM blogs
ORDER BY created_at DESC, id DESC
LIMIT ?1 OFFSET ?2
"#;

pub const COUNT_BLOGS: &str = "SELECT COUNT(*) FROM blogs";

pub const UPDATE_BLOG: &str = r#"
UPDATE blogs
SET title = ?2, content = ?3, cover_image = ?4, content_images = ?5, updated_at = ?6
WHERE id = ?1
"#;

pub const DELETE_BLOG: &str = "DELETE FROM blogs WHERE id = ?1";

pub const PING: &str = "SELECT 1";
