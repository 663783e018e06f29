//! Local disk image store.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use blogstack_core::upload::{
    local_file_name, local_file_name_from_url, unique_suffix, ImageStore, ImageUpload, Result,
    UploadError,
};
use chrono::Utc;

/// URL prefix the uploads directory is served under.
pub const UPLOADS_MOUNT: &str = "/uploads";

/// Writes images into a directory served at [`UPLOADS_MOUNT`].
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    dir: PathBuf,
}

impl LocalImageStore {
    /// Creates the directory if it does not exist.
    pub async fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        tokio::fs::create_dir_all(&dir).await?;
        tracing::debug!(dir = %dir.display(), "Uploads directory ready");
        Ok(Self { dir })
    }
}

#[async_trait]
impl ImageStore for LocalImageStore {
    async fn store(&self, upload: &ImageUpload) -> Result<String> {
        let name = local_file_name(&unique_suffix(Utc::now()), &upload.original_name);
        tokio::fs::write(self.dir.join(&name), &upload.data).await?;

        Ok(format!("{}/{}", UPLOADS_MOUNT, name))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let Some(name) = local_file_name_from_url(url, UPLOADS_MOUNT) else {
            tracing::debug!(url, "Not a local upload, skipping delete");
            return Ok(());
        };

        match tokio::fs::remove_file(self.dir.join(name)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn check(&self) -> Result<()> {
        let metadata = tokio::fs::metadata(&self.dir).await?;
        if metadata.is_dir() {
            Ok(())
        } else {
            Err(UploadError::Config(format!(
                "{} is not a directory",
                self.dir.display()
            )))
        }
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
