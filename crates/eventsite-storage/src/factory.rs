use crate::{LocalStorage, Storage, StorageResult};
use eventsite_core::Config;
use std::sync::Arc;

/// Create the storage backend described by configuration
pub async fn create_storage(config: &Config) -> StorageResult<Arc<dyn Storage>> {
    let storage = LocalStorage::new(config.uploads_dir().clone()).await?;
    tracing::info!(
        base_path = %storage.base_path().display(),
        backend = storage.backend_type(),
        "Storage backend ready"
    );
    Ok(Arc::new(storage))
}
