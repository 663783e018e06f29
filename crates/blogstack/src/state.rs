//! Application state with repository-based storage.
//!
//! The shared state passed to all request handlers. Storage is reached
//! through repository trait objects; the backend is chosen at compile time
//! via feature flags, the image store at runtime via configuration.

use std::sync::Arc;

use blogstack_auth::{AuthConfig, AuthState};
use blogstack_core::storage::{BlogRepository, UserRepository};
use blogstack_core::upload::{ImageStore, UploadPolicy};

use crate::config::Config;
use crate::uploads::build_image_store;

// ============================================================================
// Compile-time feature validation
// ============================================================================

// Storage features: exactly one must be enabled, they are mutually exclusive
#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!("Cannot enable both 'sqlite' and 'inmemory' storage features");

#[cfg(not(any(feature = "inmemory", feature = "sqlite")))]
compile_error!("Must enable exactly one storage feature: 'inmemory' or 'sqlite'");

/// Shared application state.
///
/// Cloned for each request handler.
#[derive(Clone)]
pub struct AppState {
    pub blogs: Arc<dyn BlogRepository>,
    pub users: Arc<dyn UserRepository>,
    pub images: Arc<dyn ImageStore>,
    pub upload_policy: Arc<UploadPolicy>,
    pub auth: AuthState,
}

impl AppState {
    fn build<R>(repo: Arc<R>, images: Arc<dyn ImageStore>, auth_config: AuthConfig) -> Self
    where
        R: BlogRepository + UserRepository + 'static,
    {
        let users: Arc<dyn UserRepository> = repo.clone();
        Self {
            blogs: repo,
            users: users.clone(),
            images,
            upload_policy: Arc::new(UploadPolicy::default()),
            auth: AuthState::new(users, auth_config),
        }
    }
}

impl AsRef<AuthState> for AppState {
    fn as_ref(&self) -> &AuthState {
        &self.auth
    }
}

// ============================================================================
// Backend-specific constructors
// ============================================================================

#[cfg(feature = "sqlite")]
mod sqlite_backend {
    use super::*;
    use crate::storage::SqliteRepository;

    impl AppState {
        /// Creates AppState with SQLite storage.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> anyhow::Result<Self> {
            let repo = Arc::new(SqliteRepository::new(&config.sqlite_path).await?);
            tracing::info!(path = %config.sqlite_path, "SQLite storage ready");

            let images = build_image_store(config).await?;
            Ok(Self::build(repo, images, auth_config))
        }
    }
}

#[cfg(feature = "inmemory")]
mod inmemory_backend {
    use super::*;
    use crate::storage::InMemoryRepository;

    impl AppState {
        /// Creates AppState with in-memory storage. Data is lost on restart.
        pub async fn new(config: &Config, auth_config: AuthConfig) -> anyhow::Result<Self> {
            let repo = Arc::new(InMemoryRepository::new());
            tracing::info!("In-memory storage ready");

            let images = build_image_store(config).await?;
            Ok(Self::build(repo, images, auth_config))
        }
    }
}

// ============================================================================
// Test support
// ============================================================================

#[cfg(test)]
impl AppState {
    /// In-memory storage and a local image store rooted at `uploads_dir`.
    pub async fn for_tests(uploads_dir: &std::path::Path) -> Self {
        let repo = Arc::new(crate::storage::InMemoryRepository::new());
        let images = Arc::new(
            crate::uploads::LocalImageStore::new(uploads_dir)
                .await
                .expect("create test uploads dir"),
        );
        Self::build(repo, images, AuthConfig::for_tests())
    }

    /// Replaces the upload policy (to exercise limits with small files).
    pub fn with_upload_policy(mut self, policy: UploadPolicy) -> Self {
        self.upload_policy = Arc::new(policy);
        self
    }

    pub fn with_images(mut self, images: Arc<dyn ImageStore>) -> Self {
        self.images = images;
        self
    }

    /// Replaces the blog repository; users stay where they are.
    pub fn with_blogs(mut self, blogs: Arc<dyn BlogRepository>) -> Self {
        self.blogs = blogs;
        self
    }
}
