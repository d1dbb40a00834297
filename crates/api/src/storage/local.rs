use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use newsdesk_core::error::CoreError;
use newsdesk_core::upload::{check_upload, managed_file_name, stored_file_name, UPLOADS_URL_PREFIX};
use tokio::io::AsyncWriteExt;

use super::{ImageStorage, StoredImage};

/// How many fresh names to try before giving up on an exclusive create.
const MAX_NAME_ATTEMPTS: usize = 5;

/// Stores uploads as plain files in one directory.
#[derive(Debug, Clone)]
pub struct LocalImageStorage {
    dir: PathBuf,
}

impl LocalImageStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    async fn write_new(&self, path: &Path, bytes: &[u8]) -> std::io::Result<()> {
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .await?;

        let written = async {
            file.write_all(bytes).await?;
            file.flush().await
        }
        .await;

        if let Err(err) = written {
            drop(file);
            if let Err(rm_err) = tokio::fs::remove_file(path).await {
                tracing::warn!(path = %path.display(), error = %rm_err, "Failed to remove partial upload");
            }
            return Err(err);
        }
        Ok(())
    }
}

#[async_trait]
impl ImageStorage for LocalImageStorage {
    async fn save(
        &self,
        bytes: &[u8],
        original_name: &str,
        mime_type: &str,
    ) -> Result<StoredImage, CoreError> {
        let detected = check_upload(bytes)?;
        if !detected.mime_type.eq_ignore_ascii_case(mime_type.trim()) {
            tracing::debug!(
                declared = mime_type,
                detected = detected.mime_type,
                "Declared upload type differs from content"
            );
        }
        let extension = detected.extension;

        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            CoreError::StorageWrite(format!("create {}: {e}", self.dir.display()))
        })?;

        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = stored_file_name(original_name, extension);
            let path = self.dir.join(&filename);

            match self.write_new(&path, bytes).await {
                Ok(()) => {
                    tracing::info!(%filename, size = bytes.len(), "Image stored");
                    return Ok(StoredImage {
                        url: format!("{UPLOADS_URL_PREFIX}{filename}"),
                        filename,
                    });
                }
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    tracing::debug!(%filename, "Upload name taken, retrying");
                }
                Err(e) => {
                    return Err(CoreError::StorageWrite(format!(
                        "write {}: {e}",
                        path.display()
                    )));
                }
            }
        }

        Err(CoreError::StorageWrite(format!(
            "no free file name after {MAX_NAME_ATTEMPTS} attempts"
        )))
    }

    async fn delete(&self, image: &str) {
        let Some(name) = managed_file_name(image) else {
            tracing::debug!(image, "Image is not a managed upload, skipping removal");
            return;
        };

        let path = self.dir.join(name);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => tracing::info!(path = %path.display(), "Image file removed"),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "Image file already gone");
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to remove image file");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use newsdesk_core::upload::MAX_IMAGE_BYTES;

    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn png_of_size(size: usize) -> Vec<u8> {
        let mut bytes = PNG_MAGIC.to_vec();
        bytes.resize(size, 0);
        bytes
    }

    #[tokio::test]
    async fn save_writes_file_under_uploads_prefix() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(tmp.path().join("nested/uploads"));

        let stored = storage
            .save(&png_of_size(4 * 1024 * 1024), "Front Page.png", "image/png")
            .await
            .unwrap();

        assert!(stored.url.starts_with("/uploads/front-page-"));
        assert!(stored.filename.ends_with(".png"));
        assert_eq!(stored.url, format!("/uploads/{}", stored.filename));

        let on_disk = tokio::fs::read(storage.dir().join(&stored.filename))
            .await
            .unwrap();
        assert_eq!(on_disk.len(), 4 * 1024 * 1024);
    }

    #[tokio::test]
    async fn save_rejects_oversized_file_even_with_valid_type() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(tmp.path());

        let result = storage
            .save(&png_of_size(6 * 1024 * 1024), "big.png", "image/png")
            .await;
        assert_matches!(result, Err(CoreError::PayloadTooLarge { limit, .. }) if limit == MAX_IMAGE_BYTES);
    }

    #[tokio::test]
    async fn save_rejects_disallowed_type_without_touching_disk() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("uploads");
        let storage = LocalImageStorage::new(&dir);

        let result = storage.save(b"%PDF-1.7", "doc.pdf", "application/pdf").await;
        assert_matches!(result, Err(CoreError::UnsupportedMediaType(_)));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn save_rejects_non_image_declared_as_png() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("uploads");
        let storage = LocalImageStorage::new(&dir);

        let result = storage
            .save(b"<html><body>hi</body></html>", "page.png", "image/png")
            .await;
        assert_matches!(result, Err(CoreError::UnsupportedMediaType(_)));
        assert!(!dir.exists());
    }

    #[tokio::test]
    async fn save_accepts_png_with_generic_declared_type() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(tmp.path());

        let stored = storage
            .save(&png_of_size(256), "photo.bin", "application/octet-stream")
            .await
            .unwrap();
        assert!(stored.filename.starts_with("photo-"));
        assert!(stored.filename.ends_with(".png"));
    }

    #[tokio::test]
    async fn concurrent_saves_with_same_name_get_distinct_files() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(tmp.path());
        let bytes = png_of_size(1024);

        let (a, b) = tokio::join!(
            storage.save(&bytes, "same.png", "image/png"),
            storage.save(&bytes, "same.png", "image/png"),
        );
        let (a, b) = (a.unwrap(), b.unwrap());

        assert_ne!(a.filename, b.filename);
        assert!(tmp.path().join(&a.filename).exists());
        assert!(tmp.path().join(&b.filename).exists());
    }

    #[tokio::test]
    async fn save_reports_write_error_when_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("uploads");
        tokio::fs::write(&blocker, b"not a directory").await.unwrap();
        let storage = LocalImageStorage::new(&blocker);

        let result = storage.save(&png_of_size(64), "a.png", "image/png").await;
        assert_matches!(result, Err(CoreError::StorageWrite(_)));
    }

    #[tokio::test]
    async fn delete_removes_managed_file() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalImageStorage::new(tmp.path());
        let stored = storage.save(&png_of_size(64), "a.png", "image/png").await.unwrap();

        storage.delete(&stored.url).await;
        assert!(!tmp.path().join(&stored.filename).exists());
    }

    #[tokio::test]
    async fn delete_ignores_missing_and_foreign_paths() {
        let tmp = tempfile::tempdir().unwrap();
        let outside = tmp.path().join("keep.jpg");
        tokio::fs::write(&outside, b"x").await.unwrap();
        let storage = LocalImageStorage::new(tmp.path().join("uploads"));

        storage.delete("/uploads/missing.jpg").await;
        storage.delete("https://external/keep.jpg").await;
        storage.delete("/uploads/../keep.jpg").await;

        assert!(outside.exists());
    }
}
