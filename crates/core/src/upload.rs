//! Image upload policy: accepted types, size limit, and stored file naming.
//!
//! Stored files live in one flat directory and are referenced from articles
//! as `/uploads/<name>`. Names follow `{slug}-{suffix}.{ext}` where `slug`
//! comes from the client's original file name and `suffix` is unique per
//! call.

use image::ImageFormat;

use crate::error::CoreError;

/// URL prefix under which stored uploads are referenced and served.
pub const UPLOADS_URL_PREFIX: &str = "/uploads/";

/// Maximum accepted upload size (5 MiB).
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Fallback slug when the original name has no usable characters.
const DEFAULT_SLUG: &str = "image";

/// Slugs longer than this are cut so generated names stay well below
/// common filesystem limits.
const MAX_SLUG_LEN: usize = 100;

/// An upload whose content was recognized as an accepted image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetectedImage {
    pub mime_type: &'static str,
    pub extension: &'static str,
}

/// Identify the image format from the content's magic bytes.
///
/// Returns `None` for anything outside JPEG, PNG, GIF and WebP, whatever
/// the client declared.
pub fn detect_image(bytes: &[u8]) -> Option<DetectedImage> {
    let (mime_type, extension) = match image::guess_format(bytes).ok()? {
        ImageFormat::Jpeg => ("image/jpeg", "jpg"),
        ImageFormat::Png => ("image/png", "png"),
        ImageFormat::Gif => ("image/gif", "gif"),
        ImageFormat::WebP => ("image/webp", "webp"),
        _ => return None,
    };
    Some(DetectedImage {
        mime_type,
        extension,
    })
}

/// Check an upload against the type and size policy.
///
/// The type is taken from the content, so a declared `image/png` on
/// non-image bytes is rejected and a real PNG sent as
/// `application/octet-stream` is accepted.
pub fn check_upload(bytes: &[u8]) -> Result<DetectedImage, CoreError> {
    let detected = detect_image(bytes).ok_or_else(|| {
        CoreError::UnsupportedMediaType(
            "Invalid file type. Only JPEG, PNG, GIF, and WebP are allowed.".into(),
        )
    })?;
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(CoreError::PayloadTooLarge {
            size: bytes.len(),
            limit: MAX_IMAGE_BYTES,
        });
    }
    Ok(detected)
}

/// Turn a client-supplied file name into a filesystem-safe slug.
///
/// The extension is dropped, non-alphanumeric runs collapse to a single
/// hyphen, and leading/trailing hyphens are trimmed.
pub fn slugify_file_stem(original_name: &str) -> String {
    // Clients may send full paths (old IE, some mobile browsers).
    let base = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);
    let stem = match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    };

    let mut slug = String::with_capacity(stem.len());
    let mut prev_hyphen = true;
    for c in stem.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            prev_hyphen = false;
        } else if !prev_hyphen {
            slug.push('-');
            prev_hyphen = true;
        }
    }
    slug.truncate(MAX_SLUG_LEN);
    let slug = slug.trim_end_matches('-');

    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// Build a stored file name: `{slug}-{suffix}.{ext}`.
pub fn stored_file_name(original_name: &str, extension: &str) -> String {
    let suffix = uuid::Uuid::now_v7().simple();
    format!("{}-{suffix}.{extension}", slugify_file_stem(original_name))
}

/// Extract the stored file name from an image reference, if the reference
/// points into the managed uploads area.
///
/// Returns `None` for external URLs and for anything that is not a single,
/// plain path segment (no traversal, no nested directories).
pub fn managed_file_name(image: &str) -> Option<&str> {
    let name = image.strip_prefix(UPLOADS_URL_PREFIX)?;
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    plain.then_some(name)
}

/// Whether an image reference points into the managed uploads area.
pub fn is_managed_image(image: &str) -> bool {
    managed_file_name(image).is_some()
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_of_size(size: usize) -> Vec<u8> {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.resize(size, 0);
        bytes
    }

    #[test]
    fn detects_accepted_formats_from_content() {
        assert_eq!(detect_image(PNG_MAGIC).map(|d| d.mime_type), Some("image/png"));
        assert_eq!(detect_image(b"GIF89a....").map(|d| d.extension), Some("gif"));
        assert_eq!(
            detect_image(&[0xFF, 0xD8, 0xFF, 0xE0]).map(|d| d.extension),
            Some("jpg")
        );
        assert_eq!(
            detect_image(b"RIFF\x10\x00\x00\x00WEBPVP8 ").map(|d| d.mime_type),
            Some("image/webp")
        );
    }

    #[test]
    fn rejects_content_that_is_not_an_accepted_image() {
        assert_matches!(
            check_upload(b"<html><script>alert(1)</script></html>"),
            Err(CoreError::UnsupportedMediaType(_))
        );
        assert_matches!(check_upload(b"%PDF-1.7"), Err(CoreError::UnsupportedMediaType(_)));
        assert_matches!(check_upload(b""), Err(CoreError::UnsupportedMediaType(_)));
        // BMP is a real image, but not one we serve.
        assert_matches!(check_upload(b"BM\x00\x00"), Err(CoreError::UnsupportedMediaType(_)));
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(check_upload(&png_of_size(MAX_IMAGE_BYTES)).is_ok());
        assert_matches!(
            check_upload(&png_of_size(MAX_IMAGE_BYTES + 1)),
            Err(CoreError::PayloadTooLarge { .. })
        );
        assert_matches!(
            check_upload(&png_of_size(6 * 1024 * 1024)),
            Err(CoreError::PayloadTooLarge { .. })
        );
    }

    #[test]
    fn slugify_strips_extension_and_punctuation() {
        assert_eq!(slugify_file_stem("My Holiday Photo.JPG"), "my-holiday-photo");
        assert_eq!(slugify_file_stem("  weird__name!!.png"), "weird-name");
        assert_eq!(slugify_file_stem("archive.tar.gz"), "archive-tar");
        assert_eq!(slugify_file_stem("C:\\Users\\me\\cat.png"), "cat");
    }

    #[test]
    fn slugify_falls_back_when_nothing_usable() {
        assert_eq!(slugify_file_stem(""), "image");
        assert_eq!(slugify_file_stem("日本.png"), "image");
        assert_eq!(slugify_file_stem(".png"), "png");
    }

    #[test]
    fn slugify_truncates_long_names() {
        let slug = slugify_file_stem(&format!("{}.png", "a".repeat(500)));
        assert_eq!(slug.len(), MAX_SLUG_LEN);
    }

    #[test]
    fn stored_names_are_unique() {
        let a = stored_file_name("photo.png", "png");
        let b = stored_file_name("photo.png", "png");
        assert_ne!(a, b);
        assert!(a.starts_with("photo-"));
        assert!(a.ends_with(".png"));
    }

    #[test]
    fn managed_paths() {
        assert_eq!(managed_file_name("/uploads/x.jpg"), Some("x.jpg"));
        assert!(is_managed_image("/uploads/x.jpg"));
        assert!(!is_managed_image("https://external/x.jpg"));
        assert!(!is_managed_image("/uploads/"));
        assert!(!is_managed_image("/uploads/../secret"));
        assert!(!is_managed_image("/uploads/nested/x.jpg"));
        assert!(!is_managed_image("uploads/x.jpg"));
    }
}
