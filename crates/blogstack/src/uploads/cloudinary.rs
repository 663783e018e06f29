//! Cloudinary image store, over the signed REST upload API.

use async_trait::async_trait;
use blogstack_core::upload::{
    cloudinary_public_id, cloudinary_public_id_from_url, unique_suffix, ImageStore, ImageUpload,
    Result, UploadError, ALLOWED_IMAGE_TYPES, CLOUDINARY_FOLDER,
};
use chrono::Utc;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::{Digest, Sha1};

use super::required_env;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";
/// Resize so neither side exceeds 1000px.
const TRANSFORMATION: &str = "c_limit,h_1000,w_1000";

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub api_key: String,
    pub api_secret: String,
}

impl CloudinaryConfig {
    pub fn from_env() -> Result<Self> {
        let [cloud_name, api_key, api_secret] = required_env(
            "Cloudinary",
            [
                "CLOUDINARY_CLOUD_NAME",
                "CLOUDINARY_API_KEY",
                "CLOUDINARY_API_SECRET",
            ],
        )?;
        Ok(Self {
            cloud_name,
            api_key,
            api_secret,
        })
    }
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

pub struct CloudinaryImageStore {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryImageStore {
    pub fn new(config: CloudinaryConfig) -> Self {
        tracing::info!(cloud = %config.cloud_name, "Cloudinary configured");
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/{}/image/{}", API_BASE, self.config.cloud_name, action)
    }
}

/// Signs request parameters: sorted `key=value` pairs joined by `&`, with
/// the secret appended, hashed with SHA-1 and hex encoded.
fn sign(params: &[(&str, &str)], api_secret: &str) -> String {
    let mut sorted = params.to_vec();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let to_sign = sorted
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");

    let digest = Sha1::digest(format!("{to_sign}{api_secret}").as_bytes());
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

fn backend_error(err: reqwest::Error) -> UploadError {
    UploadError::Backend(err.to_string())
}

#[async_trait]
impl ImageStore for CloudinaryImageStore {
    async fn store(&self, upload: &ImageUpload) -> Result<String> {
        let public_id = cloudinary_public_id(upload.field, &unique_suffix(Utc::now()));
        let timestamp = Utc::now().timestamp().to_string();
        let allowed_formats = ALLOWED_IMAGE_TYPES.join(",");

        let params = [
            ("allowed_formats", allowed_formats.as_str()),
            ("folder", CLOUDINARY_FOLDER),
            ("public_id", public_id.as_str()),
            ("timestamp", timestamp.as_str()),
            ("transformation", TRANSFORMATION),
        ];
        let signature = sign(&params, &self.config.api_secret);

        let file = Part::bytes(upload.data.to_vec())
            .file_name(upload.original_name.clone())
            .mime_str(&upload.content_type)
            .map_err(backend_error)?;

        let mut form = Form::new()
            .part("file", file)
            .text("api_key", self.config.api_key.clone())
            .text("signature", signature);
        for (key, value) in params {
            form = form.text(key.to_string(), value.to_string());
        }

        let response: UploadResponse = self
            .http
            .post(self.endpoint("upload"))
            .multipart(form)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(backend_error)?
            .json()
            .await
            .map_err(backend_error)?;

        Ok(response.secure_url)
    }

    async fn delete(&self, url: &str) -> Result<()> {
        let Some(public_id) = cloudinary_public_id_from_url(url) else {
            tracing::debug!(url, "Not a Cloudinary URL, skipping delete");
            return Ok(());
        };

        let timestamp = Utc::now().timestamp().to_string();
        let signature = sign(
            &[("public_id", public_id.as_str()), ("timestamp", timestamp.as_str())],
            &self.config.api_secret,
        );

        let response: DestroyResponse = self
            .http
            .post(self.endpoint("destroy"))
            .form(&[
                ("public_id", public_id.as_str()),
                ("timestamp", timestamp.as_str()),
                ("api_key", self.config.api_key.as_str()),
                ("signature", signature.as_str()),
            ])
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(backend_error)?
            .json()
            .await
            .map_err(backend_error)?;

        match response.result.as_str() {
            "ok" | "not found" => Ok(()),
            other => Err(UploadError::Backend(format!("destroy returned '{other}'"))),
        }
    }

    async fn check(&self) -> Result<()> {
        self.http
            .get(format!("{}/{}/ping", API_BASE, self.config.cloud_name))
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(backend_error)?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "cloudinary"
    }
}
