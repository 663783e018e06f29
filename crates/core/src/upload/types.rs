use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::error::UploadError;
use super::policy::UploadPolicy;

/// The multipart file fields a blog form may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImageField {
    /// `coverImage`: at most one file.
    #[serde(rename = "coverImage")]
    Cover,
    /// `contentImages`: inline images.
    #[serde(rename = "contentImages")]
    Content,
}

impl ImageField {
    /// The multipart field name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cover => "coverImage",
            Self::Content => "contentImages",
        }
    }

    /// Parses a multipart field name.
    pub fn from_field_name(name: &str) -> Option<Self> {
        match name {
            "coverImage" => Some(Self::Cover),
            "contentImages" => Some(Self::Content),
            _ => None,
        }
    }
}

impl std::fmt::Display for ImageField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image received from a client, held in memory until stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub field: ImageField,
    /// File name as sent by the client.
    pub original_name: String,
    /// MIME type as sent by the client.
    pub content_type: String,
    pub data: Bytes,
}

impl ImageUpload {
    pub fn new(
        field: ImageField,
        original_name: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        Self {
            field,
            original_name: original_name.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The images attached to one blog submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageSet {
    pub cover: Option<ImageUpload>,
    pub content: Vec<ImageUpload>,
}

impl ImageSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an upload, enforcing the per-field and total file counts.
    pub fn push(&mut self, upload: ImageUpload, policy: &UploadPolicy) -> Result<(), UploadError> {
        if self.len() >= policy.max_files {
            return Err(UploadError::TooManyFiles);
        }
        match upload.field {
            ImageField::Cover => {
                if self.cover.is_some() || policy.max_cover_images == 0 {
                    return Err(UploadError::TooManyFiles);
                }
                self.cover = Some(upload);
            }
            ImageField::Content => {
                if self.content.len() >= policy.max_content_images {
                    return Err(UploadError::TooManyFiles);
                }
                self.content.push(upload);
            }
        }
        Ok(())
    }

    /// Total number of files.
    pub fn len(&self) -> usize {
        self.content.len() + usize::from(self.cover.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png(field: ImageField) -> ImageUpload {
        ImageUpload::new(field, "a.png", "image/png", vec![0u8; 8])
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in [ImageField::Cover, ImageField::Content] {
            assert_eq!(ImageField::from_field_name(field.as_str()), Some(field));
        }
        assert_eq!(ImageField::from_field_name("avatar"), None);
    }

    #[test]
    fn test_second_cover_is_rejected() {
        let policy = UploadPolicy::default();
        let mut set = ImageSet::new();

        set.push(png(ImageField::Cover), &policy).unwrap();
        let err = set.push(png(ImageField::Cover), &policy).unwrap_err();

        assert_eq!(err, UploadError::TooManyFiles);
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_content_images_are_capped() {
        let policy = UploadPolicy::default();
        let mut set = ImageSet::new();

        for _ in 0..policy.max_content_images {
            set.push(png(ImageField::Content), &policy).unwrap();
        }
        let err = set.push(png(ImageField::Content), &policy).unwrap_err();

        assert_eq!(err, UploadError::TooManyFiles);
        assert_eq!(set.content.len(), 10);
    }

    #[test]
    fn test_full_set_holds_eleven_files() {
        let policy = UploadPolicy::default();
        let mut set = ImageSet::new();

        set.push(png(ImageField::Cover), &policy).unwrap();
        for _ in 0..10 {
            set.push(png(ImageField::Content), &policy).unwrap();
        }

        assert_eq!(set.len(), 11);
    }
}
