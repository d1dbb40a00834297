//! Image file management for uploads.
//!
//! The [`ImageStorage`] trait is the seam between the article service and
//! the filesystem; [`LocalImageStorage`] writes into a single flat public
//! directory.

use async_trait::async_trait;
use newsdesk_core::error::CoreError;

mod local;

pub use local::LocalImageStorage;

/// A successfully stored upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Public reference, e.g. `/uploads/cat-0190c1d2....png`.
    pub url: String,
    /// Generated file name inside the uploads directory.
    pub filename: String,
}

#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Validate and persist an uploaded image under a fresh, unique name.
    ///
    /// The accepted type is detected from `bytes`; `mime_type` is what the
    /// client declared and is only logged.
    ///
    /// Fails with [`CoreError::UnsupportedMediaType`],
    /// [`CoreError::PayloadTooLarge`], or [`CoreError::StorageWrite`].
    async fn save(
        &self,
        bytes: &[u8],
        original_name: &str,
        mime_type: &str,
    ) -> Result<StoredImage, CoreError>;

    /// Remove a previously stored image, best-effort.
    ///
    /// References outside the managed uploads prefix and files that no
    /// longer exist are ignored. Removal failures are logged, never returned.
    async fn delete(&self, image: &str);
}
