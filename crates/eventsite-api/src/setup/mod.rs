//! Application setup and initialization
//!
//! Startup runs in a fixed order: configuration check, tracing, database, storage, routes.

pub mod database;
pub mod routes;
pub mod server;
pub mod storage;

use crate::state::AppState;
use anyhow::{Context, Result};
use eventsite_core::Config;
use eventsite_db::Repositories;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    config.validate().context("Configuration validation failed")?;

    crate::telemetry::init_tracing(config.log_format());
    tracing::info!(
        environment = %config.environment(),
        "Configuration loaded and validated successfully"
    );

    let pool = database::setup_database(&config).await?;
    let storage = storage::setup_storage(&config).await?;

    let repos = Repositories::postgres(pool.clone());
    let state = Arc::new(AppState::new(config.clone(), repos, storage, Some(pool)));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
