//! Application state.
//!
//! Handlers take `State<Arc<AppState>>` and hand [`MediaState`] to the content upload service.

use eventsite_core::{Config, UploadPolicy};
use eventsite_db::Repositories;
use eventsite_storage::{AssetUrlComposer, Storage};
use sqlx::PgPool;
use std::sync::Arc;

/// Everything needed to accept, store and link uploaded files.
#[derive(Clone)]
pub struct MediaState {
    pub storage: Arc<dyn Storage>,
    pub urls: AssetUrlComposer,
    pub policy: UploadPolicy,
}

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub repos: Repositories,
    pub media: MediaState,
    /// Live pool for health checks; `None` when running on in-memory repositories.
    pub pool: Option<PgPool>,
}

impl AppState {
    pub fn new(
        config: Config,
        repos: Repositories,
        storage: Arc<dyn Storage>,
        pool: Option<PgPool>,
    ) -> Self {
        let media = MediaState {
            storage,
            urls: AssetUrlComposer::new(config.base_url()),
            policy: UploadPolicy::new(config.max_upload_size_bytes()),
        };

        Self {
            config,
            repos,
            media,
            pool,
        }
    }
}

fn _assert_app_state_send_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AppState>();
}
