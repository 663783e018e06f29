//! Generated names for stored images and the reverse mapping from a stored
//! URL back to a backend key.

use chrono::{DateTime, Utc};
use rand::Rng;

use super::types::ImageField;

/// Folder images are uploaded to on S3.
pub const S3_KEY_PREFIX: &str = "blog-images";
/// Folder images are uploaded to on Cloudinary.
pub const CLOUDINARY_FOLDER: &str = "blog-app";

/// A `<millis>-<random>` suffix, with random in `0..1_000_000_000`.
pub fn unique_suffix(now: DateTime<Utc>) -> String {
    let random: u32 = rand::rng().random_range(0..1_000_000_000);
    format!("{}-{}", now.timestamp_millis(), random)
}

/// The lower-cased extension of `file_name` including the dot, or `""`.
pub fn extension(file_name: &str) -> String {
    file_name
        .rsplit_once('.')
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
        .map(|(_, ext)| format!(".{}", ext.to_ascii_lowercase()))
        .unwrap_or_default()
}

/// File name used by the local disk backend.
pub fn local_file_name(suffix: &str, original_name: &str) -> String {
    format!("{}{}", suffix, extension(original_name))
}

pub fn s3_key(field: ImageField, suffix: &str, original_name: &str) -> String {
    format!(
        "{}/{}-{}{}",
        S3_KEY_PREFIX,
        field,
        suffix,
        extension(original_name)
    )
}

pub fn cloudinary_public_id(field: ImageField, suffix: &str) -> String {
    format!("{}-{}", field, suffix)
}

/// The object key of an S3 URL: everything after the first `.com/`.
pub fn s3_key_from_url(url: &str) -> Option<&str> {
    url.split_once(".com/")
        .map(|(_, key)| key)
        .filter(|key| !key.is_empty())
}

/// The public id (folder included, extension dropped) of a Cloudinary
/// delivery URL such as
/// `https://res.cloudinary.com/demo/image/upload/v17/blog-app/coverImage-1-2.jpg`.
pub fn cloudinary_public_id_from_url(url: &str) -> Option<String> {
    let (_, tail) = url.split_once("/upload/")?;
    let mut segments: Vec<&str> = tail.split('/').filter(|s| !s.is_empty()).collect();

    // Drop the version segment (`v<digits>`) if present.
    if segments
        .first()
        .is_some_and(|s| s.len() > 1 && s.starts_with('v') && s[1..].chars().all(|c| c.is_ascii_digit()))
    {
        segments.remove(0);
    }

    let last = segments.pop()?;
    let stem = last.rsplit_once('.').map(|(stem, _)| stem).unwrap_or(last);
    segments.push(stem);

    let id = segments.join("/");
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

/// The file name of a local `/uploads/<name>` URL. Rejects anything that could
/// escape the uploads directory.
pub fn local_file_name_from_url<'a>(url: &'a str, mount: &str) -> Option<&'a str> {
    let prefix = format!("{}/", mount.trim_end_matches('/'));
    let name = url.strip_prefix(prefix.as_str())?;
    if name.is_empty() || name.contains('/') || name.contains('\\') || name.starts_with('.') {
        return None;
    }
    Some(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_unique_suffix_shape() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let suffix = unique_suffix(now);
        let (millis, random) = suffix.split_once('-').unwrap();

        assert_eq!(millis, now.timestamp_millis().to_string());
        assert!(random.parse::<u32>().unwrap() < 1_000_000_000);
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("Photo.JPG"), ".jpg");
        assert_eq!(extension("archive.tar.gz"), ".gz");
        assert_eq!(extension("noext"), "");
        assert_eq!(extension(".hidden"), "");
    }

    #[test]
    fn test_backend_names() {
        assert_eq!(local_file_name("1-2", "a.PNG"), "1-2.png");
        assert_eq!(
            s3_key(ImageField::Cover, "1-2", "a.png"),
            "blog-images/coverImage-1-2.png"
        );
        assert_eq!(
            cloudinary_public_id(ImageField::Content, "1-2"),
            "contentImages-1-2"
        );
    }

    #[test]
    fn test_s3_key_from_url() {
        assert_eq!(
            s3_key_from_url("https://bucket.s3.us-east-1.amazonaws.com/blog-images/coverImage-1-2.png"),
            Some("blog-images/coverImage-1-2.png")
        );
        assert_eq!(s3_key_from_url("/uploads/1-2.png"), None);
    }

    #[test]
    fn test_cloudinary_public_id_from_url() {
        assert_eq!(
            cloudinary_public_id_from_url(
                "https://res.cloudinary.com/demo/image/upload/v1714561234/blog-app/coverImage-1-2.jpg"
            ),
            Some("blog-app/coverImage-1-2".to_string())
        );
        assert_eq!(
            cloudinary_public_id_from_url(
                "https://res.cloudinary.com/demo/image/upload/blog-app/contentImages-3-4.png"
            ),
            Some("blog-app/contentImages-3-4".to_string())
        );
        assert_eq!(cloudinary_public_id_from_url("https://example.com/a.png"), None);
    }

    #[test]
    fn test_local_file_name_from_url() {
        assert_eq!(
            local_file_name_from_url("/uploads/1-2.png", "/uploads"),
            Some("1-2.png")
        );
        assert_eq!(local_file_name_from_url("/uploads/../secret", "/uploads"), None);
        assert_eq!(local_file_name_from_url("/uploads/", "/uploads"), None);
        assert_eq!(local_file_name_from_url("https://cdn/x.png", "/uploads"), None);
    }
}
