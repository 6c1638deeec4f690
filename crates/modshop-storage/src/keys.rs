//! Shared naming rules for storage backends.
//!
//! Filenames are a single path segment. Cloud keys are `{prefix}/{category}/{filename}`
//! (the prefix is optional); local files live at `{root}/{category}/{filename}`.

use modshop_core::AssetCategory;

use crate::traits::{StorageError, StorageResult};

/// Reject filenames that could escape their category directory.
pub fn validate_filename(filename: &str) -> StorageResult<()> {
    if filename.is_empty() {
        return Err(StorageError::InvalidKey("Filename is empty".to_string()));
    }
    if filename.contains('/') || filename.contains('\\') || filename.contains("..") {
        return Err(StorageError::InvalidKey(format!(
            "Filename contains invalid characters: {}",
            filename
        )));
    }
    Ok(())
}

/// Object key for a file within a category.
pub fn object_key(prefix: &str, category: AssetCategory, filename: &str) -> String {
    if prefix.is_empty() {
        format!("{}/{}", category, filename)
    } else {
        format!("{}/{}/{}", prefix, category, filename)
    }
}

/// Percent-encode every key segment, keeping the `/` separators.
pub fn encode_key_for_url(key: &str) -> String {
    key.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}
