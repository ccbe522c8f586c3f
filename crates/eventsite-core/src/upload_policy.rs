//! Upload policy: which files are accepted and where they are filed.
//!
//! Every uploaded file passes through [`UploadPolicy::check`] before a single byte is
//! persisted. The policy is a pure predicate over the declared media type, the original
//! filename and the size; it never touches storage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use utoipa::ToSchema;

/// Message returned for any file outside the allow-list.
pub const DISALLOWED_TYPE_MESSAGE: &str = "Only images (JPG, PNG) and videos (MP4) are allowed!";

/// Media types accepted for upload.
pub const ALLOWED_CONTENT_TYPES: [&str; 4] = ["image/jpeg", "image/png", "image/jpg", "video/mp4"];

/// Coarse category a stored asset is filed under. Doubles as the upload subdirectory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum MediaCategory {
    Images,
    Videos,
}

impl MediaCategory {
    pub const ALL: [MediaCategory; 2] = [MediaCategory::Images, MediaCategory::Videos];

    /// Anything whose media type starts with `image` is an image; everything else is a video.
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.trim().to_lowercase().starts_with("image") {
            MediaCategory::Images
        } else {
            MediaCategory::Videos
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaCategory::Images => "images",
            MediaCategory::Videos => "videos",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        match name {
            "images" => Some(MediaCategory::Images),
            "videos" => Some(MediaCategory::Videos),
            _ => None,
        }
    }
}

impl fmt::Display for MediaCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UploadPolicyError {
    #[error("{}", DISALLOWED_TYPE_MESSAGE)]
    DisallowedType { content_type: String },

    #[error("File too large: {size} bytes (max: {max} bytes)")]
    FileTooLarge { size: usize, max: usize },
}

impl From<UploadPolicyError> for crate::error::AppError {
    fn from(err: UploadPolicyError) -> Self {
        match err {
            UploadPolicyError::DisallowedType { .. } => {
                crate::error::AppError::InvalidInput(err.to_string())
            }
            UploadPolicyError::FileTooLarge { max, .. } => crate::error::AppError::PayloadTooLarge(
                format!("File size exceeds maximum allowed size of {} MB", max / 1024 / 1024),
            ),
        }
    }
}

/// A file that passed the policy, with its effective media type and category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedUpload {
    pub content_type: String,
    pub category: MediaCategory,
}

/// Validation filter applied independently to each uploaded file.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_file_size: usize,
}

impl UploadPolicy {
    pub fn new(max_file_size: usize) -> Self {
        Self { max_file_size }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    /// Accept or reject a single file.
    ///
    /// The declared type is normalized (parameters stripped, lowercased) and must be on the
    /// allow-list. When the client sent no useful type (`None` or `application/octet-stream`)
    /// the type is guessed from the filename extension instead.
    pub fn check(
        &self,
        declared_content_type: Option<&str>,
        original_filename: &str,
        size: usize,
    ) -> Result<AcceptedUpload, UploadPolicyError> {
        let content_type = effective_content_type(declared_content_type, original_filename);

        if !ALLOWED_CONTENT_TYPES.contains(&content_type.as_str()) {
            return Err(UploadPolicyError::DisallowedType { content_type });
        }

        if size > self.max_file_size {
            return Err(UploadPolicyError::FileTooLarge {
                size,
                max: self.max_file_size,
            });
        }

        let category = MediaCategory::from_content_type(&content_type);
        Ok(AcceptedUpload {
            content_type,
            category,
        })
    }
}

/// Normalize MIME type by stripping parameters (e.g. "image/jpeg; charset=utf-8" -> "image/jpeg").
fn normalize_mime_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase()
}

fn effective_content_type(declared: Option<&str>, filename: &str) -> String {
    match declared.map(normalize_mime_type) {
        Some(ct) if !ct.is_empty() && ct != "application/octet-stream" => ct,
        _ => {
            let has_extension = Path::new(filename).extension().is_some();
            if has_extension {
                mime_guess::from_path(filename)
                    .first_raw()
                    .unwrap_or("application/octet-stream")
                    .to_string()
            } else {
                "application/octet-stream".to_string()
            }
        }
    }
}
