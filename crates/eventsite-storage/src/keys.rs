//! Storage naming: filenames and keys for uploaded assets.
//!
//! Filename format: `{unix-millis}-{sanitized original name}`. Key format: `{category}/{filename}`.

use eventsite_core::MediaCategory;

use crate::traits::{StorageError, StorageResult};

/// How many successive millisecond stamps are tried before giving up on a free name.
pub const MAX_NAME_ATTEMPTS: u32 = 16;

const MAX_FILENAME_LENGTH: usize = 200;

/// Reduce an uploaded filename to a safe, flat name.
///
/// Only the final path component is kept; characters outside `[A-Za-z0-9._-]` become `_`.
/// Names made only of dots and underscores, or shorter than three characters, become `file`.
pub fn sanitize_filename(filename: &str) -> String {
    let filename_only = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    let sanitized: String = filename_only
        .chars()
        .take(MAX_FILENAME_LENGTH)
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();

    if sanitized.trim_matches(['_', '.']).is_empty() || sanitized.len() < 3 {
        return "file".to_string();
    }

    sanitized
}

/// `{millis}-{name}`; `name` must already be sanitized.
pub fn timestamped_filename(unix_millis: i64, sanitized_name: &str) -> String {
    format!("{}-{}", unix_millis, sanitized_name)
}

/// Storage key for a file in a category.
pub fn storage_key(category: MediaCategory, filename: &str) -> String {
    format!("{}/{}", category.as_str(), filename)
}

/// Split a key into category and filename, rejecting anything that is not `{category}/{name}`.
pub fn parse_key(key: &str) -> StorageResult<(MediaCategory, &str)> {
    if key.starts_with('/')
        || key.contains('\\')
        || key.split('/').any(|segment| segment == "." || segment == "..")
    {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }

    let (dir, filename) = key
        .split_once('/')
        .ok_or_else(|| StorageError::InvalidKey(format!("Storage key has no category: {}", key)))?;

    let category = MediaCategory::from_dir_name(dir)
        .ok_or_else(|| StorageError::InvalidKey(format!("Unknown storage category: {}", dir)))?;

    if filename.is_empty() || filename.contains('/') {
        return Err(StorageError::InvalidKey(format!(
            "Storage key must be {{category}}/{{filename}}: {}",
            key
        )));
    }

    Ok((category, filename))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_filename_flattens_path_traversal() {
        assert_eq!(sanitize_filename(".."), "file");
        assert_eq!(sanitize_filename("foo/../bar.png"), "bar.png");
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
    }

    #[test]
    fn sanitize_filename_keeps_inner_double_dots() {
        assert_eq!(sanitize_filename("summer..party.png"), "summer..party.png");
        assert_eq!(sanitize_filename("v2..final.png"), "v2..final.png");
    }

    #[test]
    fn sanitize_filename_accepts_valid_names() {
        assert_eq!(sanitize_filename("image.png"), "image.png");
        assert_eq!(sanitize_filename("my-file_1.jpg"), "my-file_1.jpg");
    }

    #[test]
    fn sanitize_filename_flattens_and_replaces() {
        assert_eq!(sanitize_filename("C:\\photos\\beach.jpg"), "beach.jpg");
        assert_eq!(sanitize_filename("uploads/team photo.png"), "team_photo.png");
        assert_eq!(sanitize_filename("café.jpg"), "caf_.jpg");
    }

    #[test]
    fn sanitize_filename_falls_back_for_degenerate_names() {
        assert_eq!(sanitize_filename(""), "file");
        assert_eq!(sanitize_filename("a"), "file");
        assert_eq!(sanitize_filename("???"), "file");
    }

    #[test]
    fn filename_is_timestamp_dash_name() {
        assert_eq!(
            timestamped_filename(1718000000123, "stage.jpg"),
            "1718000000123-stage.jpg"
        );
    }

    #[test]
    fn keys_round_trip_through_parse() {
        let key = storage_key(MediaCategory::Videos, "1-clip.mp4");
        assert_eq!(key, "videos/1-clip.mp4");
        let (category, filename) = parse_key(&key).unwrap();
        assert_eq!(category, MediaCategory::Videos);
        assert_eq!(filename, "1-clip.mp4");
    }

    #[test]
    fn parse_key_rejects_bad_shapes() {
        for key in [
            "../etc/passwd",
            "/images/a.png",
            "docs/a.pdf",
            "images/",
            "images/a/b.png",
            "images/..",
            "images/../x",
            "a.png",
        ] {
            assert!(parse_key(key).is_err(), "{key}");
        }
    }

    #[test]
    fn parse_key_allows_dots_inside_a_filename() {
        let (category, filename) = parse_key("images/1718000000000-summer..party.png").unwrap();
        assert_eq!(category, MediaCategory::Images);
        assert_eq!(filename, "1718000000000-summer..party.png");
    }
}
