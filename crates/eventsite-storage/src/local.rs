use crate::keys::{parse_key, storage_key};
use crate::traits::{Storage, StorageError, StorageResult, StoredFile};
use async_trait::async_trait;
use bytes::Bytes;
use eventsite_core::MediaCategory;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Layout: `{base_path}/images/*` and `{base_path}/videos/*`, flat within each category.
#[derive(Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// The root and one directory per media category are created here, once. Writes never
    /// create directories afterwards.
    pub async fn new(base_path: impl Into<PathBuf>) -> StorageResult<Self> {
        let base_path = base_path.into();

        for category in MediaCategory::ALL {
            let dir = base_path.join(category.as_str());
            fs::create_dir_all(&dir).await.map_err(|e| {
                StorageError::Config(format!(
                    "Failed to create storage directory {}: {}",
                    dir.display(),
                    e
                ))
            })?;
        }

        Ok(LocalStorage { base_path })
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Convert storage key to filesystem path with security validation
    ///
    /// The key must have the `{category}/{filename}` shape, and an existing path must
    /// still resolve inside the storage root.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        parse_key(storage_key)?;

        let path = self.base_path.join(storage_key);

        if let Ok(canonical) = path.canonicalize() {
            let base_canonical = self.base_path.canonicalize().map_err(|e| {
                StorageError::Config(format!("Failed to canonicalize base path: {}", e))
            })?;
            if canonical.strip_prefix(&base_canonical).is_err() {
                return Err(StorageError::InvalidKey(
                    "Storage key resolves outside storage directory".to_string(),
                ));
            }
        }

        Ok(path)
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(
        &self,
        category: MediaCategory,
        filename: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile> {
        let key = storage_key(category, filename);
        let path = self.key_to_path(&key)?;
        let size = data.len();

        let start = std::time::Instant::now();

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(key));
            }
            Err(e) => {
                return Err(StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let written = async {
            file.write_all(&data).await?;
            file.sync_all().await
        }
        .await;

        if let Err(e) = written {
            // Do not leave a truncated asset behind under a name that is now taken.
            let _ = fs::remove_file(&path).await;
            return Err(StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                path.display(),
                e
            )));
        }

        tracing::info!(
            path = %path.display(),
            key = %key,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredFile {
            key,
            category,
            filename: filename.to_string(),
            size_bytes: size,
        })
    }

    async fn read(&self, storage_key: &str) -> StorageResult<Vec<u8>> {
        let path = self.key_to_path(storage_key)?;

        match fs::read(&path).await {
            Ok(data) => Ok(data),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                Err(StorageError::NotFound(storage_key.to_string()))
            }
            Err(e) => Err(StorageError::ReadFailed(format!(
                "Failed to read file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    async fn exists(&self, storage_key: &str) -> StorageResult<bool> {
        let path = self.key_to_path(storage_key)?;
        Ok(fs::try_exists(&path).await?)
    }

    async fn delete(&self, storage_key: &str) -> StorageResult<()> {
        let path = self.key_to_path(storage_key)?;

        match fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(path = %path.display(), key = %storage_key, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn backend_type(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_category_directories_created_on_construction() {
        let dir = tempdir().unwrap();
        let _storage = LocalStorage::new(dir.path()).await.unwrap();

        assert!(dir.path().join("images").is_dir());
        assert!(dir.path().join("videos").is_dir());
    }

    #[tokio::test]
    async fn test_local_storage_store_read() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let data = Bytes::from_static(b"\x89PNG fake");
        let stored = storage
            .store(MediaCategory::Images, "1700000000000-a.png", data.clone())
            .await
            .unwrap();

        assert_eq!(stored.key, "images/1700000000000-a.png");
        assert_eq!(stored.size_bytes, data.len());
        assert!(dir.path().join("images/1700000000000-a.png").is_file());

        let read = storage.read(&stored.key).await.unwrap();
        assert_eq!(read, data.to_vec());
    }

    #[tokio::test]
    async fn test_store_never_overwrites() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        storage
            .store(MediaCategory::Videos, "1-clip.mp4", Bytes::from_static(b"first"))
            .await
            .unwrap();
        let second = storage
            .store(MediaCategory::Videos, "1-clip.mp4", Bytes::from_static(b"second"))
            .await;

        assert!(matches!(second, Err(StorageError::AlreadyExists(_))));
        assert_eq!(storage.read("videos/1-clip.mp4").await.unwrap(), b"first");
    }

    #[tokio::test]
    async fn test_store_upload_resolves_same_name_collisions() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let a = storage
            .store_upload(MediaCategory::Images, "stage.jpg", Bytes::from_static(b"a"))
            .await
            .unwrap();
        let b = storage
            .store_upload(MediaCategory::Images, "stage.jpg", Bytes::from_static(b"b"))
            .await
            .unwrap();

        assert_ne!(a.key, b.key);
        assert!(a.filename.ends_with("-stage.jpg"));
        assert!(b.filename.ends_with("-stage.jpg"));
        assert_eq!(storage.read(&a.key).await.unwrap(), b"a");
        assert_eq!(storage.read(&b.key).await.unwrap(), b"b");
    }

    #[tokio::test]
    async fn test_store_fails_when_category_dir_missing() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();
        std::fs::remove_dir(dir.path().join("videos")).unwrap();

        let result = storage
            .store(MediaCategory::Videos, "1-clip.mp4", Bytes::from_static(b"x"))
            .await;
        assert!(matches!(result, Err(StorageError::UploadFailed(_))));
    }

    #[tokio::test]
    async fn test_path_traversal_rejected() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let result = storage.read("../../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.delete("images/../../etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));

        let result = storage.exists("/etc/passwd").await;
        assert!(matches!(result, Err(StorageError::InvalidKey(_))));
    }

    #[tokio::test]
    async fn test_local_storage_delete_nonexistent() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        assert!(storage.delete("images/missing.png").await.is_ok());
    }

    #[tokio::test]
    async fn test_local_storage_exists_and_delete() {
        let dir = tempdir().unwrap();
        let storage = LocalStorage::new(dir.path()).await.unwrap();

        let stored = storage
            .store(MediaCategory::Images, "1-x.jpg", Bytes::from_static(b"x"))
            .await
            .unwrap();

        assert!(storage.exists(&stored.key).await.unwrap());
        storage.delete(&stored.key).await.unwrap();
        assert!(!storage.exists(&stored.key).await.unwrap());
        assert!(matches!(
            storage.read(&stored.key).await,
            Err(StorageError::NotFound(_))
        ));
    }
}
