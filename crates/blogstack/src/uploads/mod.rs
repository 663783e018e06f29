//! Image store backends.
//!
//! The local disk backend is always compiled in. S3 and Cloudinary are behind
//! the `s3` and `cloudinary` features and selected at runtime through
//! `UPLOAD_BACKEND`.

#[cfg(feature = "cloudinary")]
mod cloudinary;
mod local;
#[cfg(feature = "s3")]
mod s3;

use std::sync::Arc;

use blogstack_core::upload::ImageStore;

use crate::config::{Config, UploadBackend};

pub use local::{LocalImageStore, UPLOADS_MOUNT};

/// Builds the image store selected by the configuration.
pub async fn build_image_store(config: &Config) -> anyhow::Result<Arc<dyn ImageStore>> {
    let store: Arc<dyn ImageStore> = match config.upload_backend {
        UploadBackend::Local => Arc::new(LocalImageStore::new(&config.uploads_dir).await?),

        #[cfg(feature = "s3")]
        UploadBackend::S3 => Arc::new(s3::S3ImageStore::new(s3::S3Config::from_env()?).await),
        #[cfg(not(feature = "s3"))]
        UploadBackend::S3 => {
            anyhow::bail!("UPLOAD_BACKEND=s3 requires building with the `s3` feature")
        }

        #[cfg(feature = "cloudinary")]
        UploadBackend::Cloudinary => Arc::new(cloudinary::CloudinaryImageStore::new(
            cloudinary::CloudinaryConfig::from_env()?,
        )),
        #[cfg(not(feature = "cloudinary"))]
        UploadBackend::Cloudinary => {
            anyhow::bail!("UPLOAD_BACKEND=cloudinary requires building with the `cloudinary` feature")
        }
    };

    tracing::info!(backend = store.name(), "Image store ready");
    Ok(store)
}

/// Deletes each URL, logging failures instead of returning them.
pub async fn delete_images<I, S>(store: &dyn ImageStore, urls: I)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for url in urls {
        let url = url.as_ref();
        if url.is_empty() {
            continue;
        }
        match store.delete(url).await {
            Ok(()) => tracing::debug!(url, backend = store.name(), "Deleted image"),
            Err(e) => tracing::warn!(url, backend = store.name(), error = %e, "Failed to delete image"),
        }
    }
}

/// Reads the named variables, reporting every missing one at once.
#[cfg(any(feature = "s3", feature = "cloudinary"))]
fn required_env<const N: usize>(
    backend: &str,
    names: [&str; N],
) -> Result<[String; N], blogstack_core::upload::UploadError> {
    let values = names.map(|name| std::env::var(name).ok().filter(|v| !v.is_empty()));

    let missing: Vec<&str> = names
        .iter()
        .zip(values.iter())
        .filter(|(_, value)| value.is_none())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(blogstack_core::upload::UploadError::Config(format!(
            "Missing required {} environment variables: {}",
            backend,
            missing.join(", ")
        )));
    }

    Ok(values.map(Option::unwrap_or_default))
}
