use thiserror::Error;

use crate::storage::RepositoryError;
use crate::upload::UploadError;
use crate::validation::ValidationErrors;

/// Failures of the blog operations, independent of transport.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BlogError {
    #[error("Blog not found")]
    NotFound,

    #[error("User not authorized")]
    NotAuthorized,

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error(transparent)]
    Repository(RepositoryError),
}

impl From<RepositoryError> for BlogError {
    fn from(err: RepositoryError) -> Self {
        if err.is_not_found() {
            Self::NotFound
        } else {
            Self::Repository(err)
        }
    }
}
