//! Amazon S3 image store.

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_s3::{error::DisplayErrorContext, primitives::ByteStream, types::ObjectCannedAcl, Client};
use blogstack_core::upload::{
    s3_key, s3_key_from_url, unique_suffix, ImageStore, ImageUpload, Result, UploadError,
};
use chrono::Utc;

use super::required_env;

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
}

impl S3Config {
    /// Reads `AWS_BUCKET_NAME` and `AWS_REGION`. Credentials come from the
    /// standard AWS provider chain.
    pub fn from_env() -> Result<Self> {
        let [bucket, region] = required_env("AWS", ["AWS_BUCKET_NAME", "AWS_REGION"])?;
        Ok(Self { bucket, region })
    }
}

/// Stores images as public-read objects under `blog-images/`.
pub struct S3ImageStore {
    client: Client,
    config: S3Config,
}

impl S3ImageStore {
    pub async fn new(config: S3Config) -> Self {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .load()
            .await;

        tracing::info!(bucket = %config.bucket, region = %config.region, "S3 configured");

        Self {
            client: Client::new(&sdk_config),
            config,
        }
    }

    fn object_url(&self, key: &str) -> String {
        format!(
            "https://{}.s3.{}.amazonaws.com/{}",
            self.config.bucket, self.config.region, key
        )
    }
}

fn backend_error<E: std::error::Error>(err: E) -> UploadError {
    UploadError::Backend(DisplayErrorContext(err).to_string())
}

#[async_trait]
impl ImageStore for S3ImageStore {
    async fn store(&self, upload: &ImageUpload) -> Result<String> {
        let key = s3_key(
            upload.field,
            &unique_suffix(Utc::now()),
            &upload.original_name,
        );

        self.client
            .put_object()
            .bucket(&self.config.bucket)
            .key(&key)
            .body(ByteStream::from(upload.data.clone()))
            .content_type(&upload.content_type)
            .acl(ObjectCannedAcl::PublicRead)
            .metadata("fieldName", upload.field.as_str())
            .send()
            .await
            .map_err(backend_error)?;

        Ok(self.object_url(&key))
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let Some(key) = s3_key_from_url(url) else {
            tracing::debug!(url, "Not an S3 URL, skipping delete");
            return Ok(());
        };

        self.client
            .delete_object()
            .bucket(&self.config.bucket)
            .key(key)
            .send()
            .await
            .map_err(backend_error)?;

        Ok(())
    }

    async fn check(&self) -> Result<()> {
        self.client
            .list_buckets()
            .send()
            .await
            .map_err(backend_error)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "s3"
    }
}
