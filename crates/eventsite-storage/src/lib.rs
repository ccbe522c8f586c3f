//! Eventsite Storage Library
//!
//! Storage abstraction for uploaded assets, with a local filesystem backend.
//!
//! # Storage key format
//!
//! Every stored asset lives directly under its media category:
//!
//! - images: `images/{filename}`
//! - videos: `videos/{filename}`
//!
//! Filenames are `{unix-millis}-{sanitized original name}` (see [`keys`]). Keys must not
//! contain `..`, a leading `/` or further path separators. The public URL of a key is built
//! by [`AssetUrlComposer`] as `{base_url}/uploads/{key}`.

pub mod factory;
pub mod keys;
pub mod local;
pub mod traits;
pub mod url;

// Re-export commonly used types
pub use factory::create_storage;
pub use local::LocalStorage;
pub use traits::{Storage, StorageError, StorageResult, StoredFile};
pub use url::AssetUrlComposer;
