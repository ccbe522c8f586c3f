//! Public URLs for stored assets.

use eventsite_core::MediaCategory;

use crate::keys::storage_key;

/// Route prefix under which the uploads tree is served.
pub const UPLOADS_ROUTE: &str = "/uploads";

/// Builds `{base_url}/uploads/{category}/{filename}`.
#[derive(Debug, Clone)]
pub struct AssetUrlComposer {
    base_url: String,
}

impl AssetUrlComposer {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, category: MediaCategory, filename: &str) -> String {
        format!(
            "{}{}/{}",
            self.base_url,
            UPLOADS_ROUTE,
            storage_key(category, filename)
        )
    }
}
