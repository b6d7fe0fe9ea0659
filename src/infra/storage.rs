//! Local disk storage for comment attachments.
//!
//! Files land in the upload directory under a generated UUID name; the
//! original name survives only in the returned metadata. Deletion accepts
//! the public URL and refuses anything that resolves outside the directory.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::constants::UPLOAD_URL_PREFIX;
use crate::errors::{AppError, AppResult};

#[cfg(test)]
use mockall::automock;

/// Stored-file metadata returned to the client after an upload.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StoredFile {
    pub file_name: String,
    pub file_type: String,
    pub file_url: String,
}

/// File storage operations.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FileStorage: Send + Sync {
    async fn save(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<StoredFile>;

    /// Delete a previously stored file by its public URL.
    async fn delete(&self, file_url: &str) -> AppResult<()>;
}

/// Disk-backed storage rooted at the configured upload directory.
pub struct DiskStorage {
    root: PathBuf,
}

impl DiskStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn stored_name(original_name: &str) -> String {
        let extension = Path::new(original_name)
            .extension()
            .and_then(|e| e.to_str());
        match extension {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
            None => Uuid::new_v4().to_string(),
        }
    }

    /// Resolve a public URL back to a path inside the root, rejecting
    /// anything with traversal components.
    fn path_for_url(&self, file_url: &str) -> AppResult<PathBuf> {
        let name = file_url
            .strip_prefix(UPLOAD_URL_PREFIX)
            .ok_or_else(|| AppError::bad_request("Not an upload URL"))?;
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(AppError::bad_request("Invalid file name"));
        }
        Ok(self.root.join(name))
    }
}

#[async_trait]
impl FileStorage for DiskStorage {
    async fn save(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<StoredFile> {
        let stored = Self::stored_name(original_name);
        let path = self.root.join(&stored);

        // The upload directory may not exist on a fresh deployment
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::internal(format!("Failed to create upload dir: {e}")))?;

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::internal(format!("Failed to write upload: {e}")))?;

        tracing::debug!(file = %stored, "Stored uploaded file");

        Ok(StoredFile {
            file_name: original_name.to_string(),
            file_type: content_type.to_string(),
            file_url: format!("{UPLOAD_URL_PREFIX}{stored}"),
        })
    }

    async fn delete(&self, file_url: &str) -> AppResult<()> {
        let path = self.path_for_url(file_url)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(AppError::NotFound),
            Err(e) => Err(AppError::internal(format!("Failed to delete upload: {e}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_name_keeps_extension() {
        let name = DiskStorage::stored_name("report.pdf");
        assert!(name.ends_with(".pdf"));
        assert_ne!(name, "report.pdf");
    }

    #[test]
    fn stored_name_without_extension() {
        let name = DiskStorage::stored_name("README");
        assert!(!name.contains('.'));
    }

    #[test]
    fn delete_rejects_traversal() {
        let storage = DiskStorage::new("uploads");
        assert!(storage.path_for_url("/uploads/../etc/passwd").is_err());
        assert!(storage.path_for_url("/uploads/a/b").is_err());
        assert!(storage.path_for_url("/elsewhere/file.txt").is_err());
        assert!(storage.path_for_url("/uploads/").is_err());
    }

    #[test]
    fn delete_accepts_plain_names() {
        let storage = DiskStorage::new("uploads");
        let path = storage.path_for_url("/uploads/abc.png");
        assert!(path.is_ok());
    }

    #[tokio::test]
    async fn save_creates_missing_upload_dir() {
        let root = std::env::temp_dir()
            .join(format!("crm-upload-test-{}", Uuid::new_v4()))
            .join("nested");
        let storage = DiskStorage::new(&root);

        let stored = storage
            .save("note.txt", "text/plain", b"hello".to_vec())
            .await
            .unwrap();
        assert_eq!(stored.file_name, "note.txt");
        assert!(root.exists());

        storage.delete(&stored.file_url).await.unwrap();
        tokio::fs::remove_dir_all(root.parent().unwrap()).await.unwrap();
    }
}
