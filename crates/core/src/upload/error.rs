use thiserror::Error;

/// Errors raised while receiving, storing or deleting images.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("File size is too large. Maximum size is 5MB.")]
    FileTooLarge,

    #[error("Too many files uploaded.")]
    TooManyFiles,

    #[error("Unexpected field")]
    UnexpectedField(String),

    #[error("File upload only supports the following filetypes: jpeg, jpg, png, gif")]
    UnsupportedType,

    #[error("Malformed upload: {0}")]
    Malformed(String),

    #[error("Upload backend misconfigured: {0}")]
    Config(String),

    #[error("Upload backend failed: {0}")]
    Backend(String),

    #[error("I/O error: {0}")]
    Io(String),
}

impl UploadError {
    /// True when the client sent something the policy rejects (HTTP 400).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::FileTooLarge
                | Self::TooManyFiles
                | Self::UnexpectedField(_)
                | Self::UnsupportedType
                | Self::Malformed(_)
        )
    }
}

impl From<std::io::Error> for UploadError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
