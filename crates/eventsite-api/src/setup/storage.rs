//! Storage setup and initialization

use anyhow::{Context, Result};
use eventsite_core::Config;
use eventsite_storage::{create_storage, Storage};
use std::sync::Arc;

/// Create the uploads tree and the storage backend over it.
pub async fn setup_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    tracing::info!("Initializing storage abstraction...");
    let storage = create_storage(config)
        .await
        .context("Failed to initialize upload storage")?;
    tracing::info!(
        backend = storage.backend_type(),
        uploads_dir = %config.uploads_dir().display(),
        "Storage abstraction initialized successfully"
    );
    Ok(storage)
}
