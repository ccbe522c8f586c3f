//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use chrono::Utc;
use eventsite_core::MediaCategory;
use thiserror::Error;

use crate::keys::{sanitize_filename, timestamped_filename, MAX_NAME_ATTEMPTS};

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("File already exists: {0}")]
    AlreadyExists(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<StorageError> for eventsite_core::AppError {
    fn from(err: StorageError) -> Self {
        use eventsite_core::AppError;

        match err {
            StorageError::NotFound(msg) => AppError::NotFound(msg),
            StorageError::InvalidKey(msg) => AppError::InvalidInput(msg),
            StorageError::Config(msg) => AppError::Internal(msg),
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// A file written by a storage backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// `{category}/{filename}`
    pub key: String,
    pub category: MediaCategory,
    pub filename: String,
    pub size_bytes: usize,
}

/// Storage abstraction trait
///
/// Backends write each file exactly once: `store` never replaces an existing file and
/// reports [`StorageError::AlreadyExists`] instead.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` to `{category}/{filename}`. Fails if that file already exists.
    async fn store(
        &self,
        category: MediaCategory,
        filename: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile>;

    /// Read a file by its storage key
    async fn read(&self, storage_key: &str) -> StorageResult<Vec<u8>>;

    /// Check if a file exists
    async fn exists(&self, storage_key: &str) -> StorageResult<bool>;

    /// Delete a file by its storage key. Deleting a missing file succeeds.
    async fn delete(&self, storage_key: &str) -> StorageResult<()>;

    /// Short backend name for logs and health output
    fn backend_type(&self) -> &'static str;

    /// Name and store an upload under `{millis}-{original name}`.
    ///
    /// If another upload already took that name in the same millisecond, the stamp is
    /// bumped by one millisecond and the write retried, up to [`MAX_NAME_ATTEMPTS`] times.
    async fn store_upload(
        &self,
        category: MediaCategory,
        original_filename: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile> {
        let safe_name = sanitize_filename(original_filename);
        let stamp = Utc::now().timestamp_millis();

        for attempt in 0..MAX_NAME_ATTEMPTS {
            let filename = timestamped_filename(stamp + i64::from(attempt), &safe_name);
            match self.store(category, &filename, data.clone()).await {
                Err(StorageError::AlreadyExists(key)) => {
                    tracing::debug!(key = %key, attempt, "Storage name taken, bumping timestamp");
                }
                other => return other,
            }
        }

        Err(StorageError::UploadFailed(format!(
            "No free filename for {} after {} attempts",
            safe_name, MAX_NAME_ATTEMPTS
        )))
    }
}
