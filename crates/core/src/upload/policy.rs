//! Limits and type checks applied to every incoming image.

use super::error::UploadError;
use super::types::ImageField;

/// 5 MiB per file.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;
pub const MAX_COVER_IMAGES: usize = 1;
pub const MAX_CONTENT_IMAGES: usize = 10;
pub const MAX_FILES: usize = MAX_COVER_IMAGES + MAX_CONTENT_IMAGES;

/// Extensions (and MIME subtypes) accepted for images.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["jpeg", "jpg", "png", "gif"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPolicy {
    pub max_file_size: usize,
    pub max_files: usize,
    pub max_cover_images: usize,
    pub max_content_images: usize,
}

impl Default for UploadPolicy {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE,
            max_files: MAX_FILES,
            max_cover_images: MAX_COVER_IMAGES,
            max_content_images: MAX_CONTENT_IMAGES,
        }
    }
}

impl UploadPolicy {
    /// Upper bound for a whole request body: every file at its maximum plus
    /// headroom for text fields and multipart framing.
    pub fn max_body_size(&self) -> usize {
        self.max_file_size
            .saturating_mul(self.max_files)
            .saturating_add(1024 * 1024)
    }

    /// Resolves a multipart file field name.
    pub fn check_field(&self, name: &str) -> Result<ImageField, UploadError> {
        ImageField::from_field_name(name).ok_or_else(|| UploadError::UnexpectedField(name.to_string()))
    }

    pub fn check_size(&self, len: usize) -> Result<(), UploadError> {
        if len > self.max_file_size {
            return Err(UploadError::FileTooLarge);
        }
        Ok(())
    }

    /// Both the file extension and the MIME type must name an allowed type.
    pub fn check_type(&self, file_name: &str, content_type: &str) -> Result<(), UploadError> {
        if is_allowed_extension(file_name) && is_allowed_mime(content_type) {
            Ok(())
        } else {
            Err(UploadError::UnsupportedType)
        }
    }
}

fn is_allowed_extension(file_name: &str) -> bool {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_IMAGE_TYPES.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

fn is_allowed_mime(content_type: &str) -> bool {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    essence
        .strip_prefix("image/")
        .map(|subtype| ALLOWED_IMAGE_TYPES.contains(&subtype))
        .unwrap_or(false)
}
