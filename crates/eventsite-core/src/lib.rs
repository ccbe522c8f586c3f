//! Eventsite Core Library
//!
//! This crate provides the domain models, error types, configuration, upload policy and
//! asset association rules shared across all eventsite components.

pub mod assets;
pub mod config;
pub mod error;
pub mod models;
pub mod upload_policy;

// Re-export commonly used types
pub use assets::{
    check_image_ceiling, merge_assets, merge_scalar, AssetBearing, AssetSlot, FileField,
    RecordOp, StoredAsset, StoredAssets, UploadLayout,
};
pub use config::{BaseConfig, Config, SiteConfig};
pub use models::{ContentRecord, FormFields, Record};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use upload_policy::{MediaCategory, UploadPolicy, UploadPolicyError};
