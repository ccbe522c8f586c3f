//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p eventsite-api`. Repositories are in memory and
//! uploads go to a temporary directory, so no database is needed.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use eventsite_api::constants;
use eventsite_api::setup::routes;
use eventsite_api::state::AppState;
use eventsite_core::models::Gallery;
use eventsite_core::Config;
use eventsite_db::db::memory::MemoryRepository;
use eventsite_db::Repositories;
use eventsite_storage::{LocalStorage, Storage};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

pub const BASE_URL: &str = "http://localhost:5000";

/// API path prefix for tests (e.g. `/api/v1`).
pub fn api_path(path: &str) -> String {
    format!("{}{}", constants::API_PREFIX, path)
}

/// Test application: server, repositories, and owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub repos: Repositories,
    /// Same repository as `repos.galleries`, with access to failure injection
    pub galleries: Arc<MemoryRepository<Gallery>>,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn uploads_dir(&self) -> &Path {
        self._temp_dir.path()
    }

    /// File names currently stored under `images` or `videos`.
    pub fn stored_files(&self, category: &str) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.uploads_dir().join(category))
            .expect("category directory exists")
            .map(|e| e.expect("dir entry").file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    pub fn stored_file_count(&self) -> usize {
        self.stored_files("images").len() + self.stored_files("videos").len()
    }

    /// Path of a stored file given its public URL.
    pub fn path_for_url(&self, url: &str) -> PathBuf {
        let key = url
            .strip_prefix(&format!("{}/uploads/", BASE_URL))
            .expect("URL under BASE_URL/uploads");
        self.uploads_dir().join(key)
    }

    /// Wait for background cleanup to bring the stored file count down to `expected`.
    pub async fn wait_for_file_count(&self, expected: usize) {
        for _ in 0..100 {
            if self.stored_file_count() == expected {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(self.stored_file_count(), expected);
    }
}

fn create_test_config(uploads_dir: &Path, extra: &[(&str, &str)]) -> Config {
    let mut vars: HashMap<String, String> = HashMap::from([
        ("DATABASE_URL".to_string(), "postgres://unused@localhost/eventsite".to_string()),
        ("BASE_URL".to_string(), BASE_URL.to_string()),
        ("UPLOADS_DIR".to_string(), uploads_dir.display().to_string()),
    ]);
    for (k, v) in extra {
        vars.insert(k.to_string(), v.to_string());
    }
    Config::from_lookup(move |key| vars.get(key).cloned()).expect("valid test config")
}

/// Setup test app with in-memory repositories and local storage in a temp directory.
pub async fn setup_test_app() -> TestApp {
    setup_test_app_with(&[]).await
}

/// Like [`setup_test_app`], with extra configuration variables.
pub async fn setup_test_app_with(extra: &[(&str, &str)]) -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let config = create_test_config(temp_dir.path(), extra);

    let storage: Arc<dyn Storage> = Arc::new(
        LocalStorage::new(temp_dir.path())
            .await
            .expect("Failed to create local storage"),
    );

    let galleries = Arc::new(MemoryRepository::<Gallery>::new());
    let mut repos = Repositories::memory();
    repos.galleries = galleries.clone();

    let state = Arc::new(AppState::new(config.clone(), repos.clone(), storage, None));
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp {
        server,
        repos,
        galleries,
        _temp_dir: temp_dir,
    }
}
