use std::{env, path::PathBuf, str::FromStr, time::Duration};

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unknown UPLOAD_BACKEND '{0}', expected one of: local, s3, cloudinary")]
    UnknownUploadBackend(String),
    #[error("unknown LOG_FORMAT '{0}', expected 'pretty' or 'json'")]
    UnknownLogFormat(String),
}

/// Where uploaded images are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadBackend {
    #[default]
    Local,
    S3,
    Cloudinary,
}

impl FromStr for UploadBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            "cloudinary" => Ok(Self::Cloudinary),
            other => Err(ConfigError::UnknownUploadBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnknownLogFormat(other.to_string())),
        }
    }
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file (default: "blogstack.db")
    /// Note: Only used when the `sqlite` feature is enabled.
    #[allow(dead_code)]
    pub sqlite_path: String,
    pub upload_backend: UploadBackend,
    /// Directory for the local upload backend (default: "uploads")
    pub uploads_dir: PathBuf,
    /// Allowed CORS origin; any origin when unset.
    pub cors_origin: Option<String>,
    pub request_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `SQLITE_PATH` - SQLite database path (default: "blogstack.db")
    /// - `UPLOAD_BACKEND` - `local`, `s3` or `cloudinary` (default: "local")
    /// - `UPLOADS_DIR` - Local upload directory (default: "uploads")
    /// - `CORS_ORIGIN` - Allowed origin (default: any)
    /// - `REQUEST_TIMEOUT_SECONDS` - Per-request timeout (default: 30)
    /// - `LOG_FORMAT` - `pretty` or `json` (default: "pretty")
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            sqlite_path: env::var("SQLITE_PATH").unwrap_or_else(|_| "blogstack.db".to_string()),
            upload_backend: env::var("UPLOAD_BACKEND")
                .map(|v| v.parse::<UploadBackend>())
                .unwrap_or(Ok(UploadBackend::Local))?,
            uploads_dir: env::var("UPLOADS_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            cors_origin: env::var("CORS_ORIGIN").ok().filter(|v| !v.trim().is_empty()),
            request_timeout: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(Duration::from_secs(30)),
            log_format: env::var("LOG_FORMAT")
                .map(|v| v.parse::<LogFormat>())
                .unwrap_or(Ok(LogFormat::Pretty))?,
        })
    }

    /// Defaults with uploads written to `uploads_dir`.
    #[cfg(test)]
    pub fn for_tests(uploads_dir: impl Into<PathBuf>) -> Self {
        Self {
            sqlite_path: ":memory:".to_string(),
            upload_backend: UploadBackend::Local,
            uploads_dir: uploads_dir.into(),
            cors_origin: None,
            request_timeout: Duration::from_secs(10),
            log_format: LogFormat::Pretty,
        }
    }
}
