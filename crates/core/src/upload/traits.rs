use async_trait::async_trait;

use super::error::UploadError;
use super::types::ImageUpload;

pub type Result<T> = std::result::Result<T, UploadError>;

/// Where uploaded images end up.
///
/// Implementations hold no per-request state and are shared behind an `Arc`.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Persists the image and returns the URL (or path) clients use to fetch it.
    async fn store(&self, upload: &ImageUpload) -> Result<String>;

    /// Removes a previously stored image. Unknown URLs are not an error.
    async fn delete(&self, url: &str) -> Result<()>;

    /// Verifies the backend is reachable.
    async fn check(&self) -> Result<()>;

    /// Short backend name for logs and health output.
    fn name(&self) -> &'static str;
}
