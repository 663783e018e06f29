//! Image upload policy, naming and the storage seam.

mod error;
mod naming;
mod policy;
mod traits;
mod types;

pub use error::UploadError;
pub use naming::{
    cloudinary_public_id, cloudinary_public_id_from_url, extension, local_file_name,
    local_file_name_from_url, s3_key, s3_key_from_url, unique_suffix, CLOUDINARY_FOLDER,
    S3_KEY_PREFIX,
};
pub use policy::{
    UploadPolicy, ALLOWED_IMAGE_TYPES, MAX_CONTENT_IMAGES, MAX_COVER_IMAGES, MAX_FILES,
    MAX_FILE_SIZE,
};
pub use traits::{ImageStore, Result};
pub use types::{ImageField, ImageSet, ImageUpload};
