//! Upload service: attachment files on disk.

use async_trait::async_trait;
use std::sync::Arc;

use crate::errors::{AppError, AppResult};
use crate::infra::{FileStorage, StoredFile};

/// Upload use cases.
#[async_trait]
pub trait UploadService: Send + Sync {
    async fn upload(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<StoredFile>;

    async fn remove(&self, file_url: &str) -> AppResult<()>;
}

/// Concrete implementation over a storage backend.
pub struct UploadDesk {
    storage: Arc<dyn FileStorage>,
    max_size_bytes: usize,
}

impl UploadDesk {
    pub fn new(storage: Arc<dyn FileStorage>, max_size_bytes: usize) -> Self {
        Self {
            storage,
            max_size_bytes,
        }
    }
}

#[async_trait]
impl UploadService for UploadDesk {
    async fn upload(
        &self,
        original_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> AppResult<StoredFile> {
        if bytes.is_empty() {
            return Err(AppError::validation("Empty file"));
        }
        if bytes.len() > self.max_size_bytes {
            return Err(AppError::validation("File too large"));
        }
        self.storage.save(original_name, content_type, bytes).await
    }

    async fn remove(&self, file_url: &str) -> AppResult<()> {
        self.storage.delete(file_url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::MockFileStorage;

    #[tokio::test]
    async fn oversized_upload_rejected_before_storage() {
        // No storage expectations: the call must not reach it
        let storage = MockFileStorage::new();
        let service = UploadDesk::new(Arc::new(storage), 4);

        let result = service
            .upload("big.bin", "application/octet-stream", vec![0u8; 5])
            .await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn upload_within_limit_stored() {
        let mut storage = MockFileStorage::new();
        storage.expect_save().returning(|name, ctype, _| {
            Ok(StoredFile {
                file_name: name.to_string(),
                file_type: ctype.to_string(),
                file_url: "/uploads/x.png".into(),
            })
        });
        let service = UploadDesk::new(Arc::new(storage), 1024);

        let stored = service
            .upload("logo.png", "image/png", vec![1, 2, 3])
            .await
            .unwrap();
        assert_eq!(stored.file_name, "logo.png");
    }
}
