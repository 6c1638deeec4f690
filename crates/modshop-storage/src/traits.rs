//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use async_trait::async_trait;
use bytes::Bytes;
use modshop_core::{AppError, AssetCategory, StorageAddress, StorageBackend, StoredFile};
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Download failed: {0}")]
    DownloadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("Storage backend not available: {0}")]
    BackendUnavailable(StorageBackend),

    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for AppError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConfigError(_) | StorageError::BackendUnavailable(_) => {
                AppError::Config(err.to_string())
            }
            other => AppError::Storage(other.to_string()),
        }
    }
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage abstraction trait
///
/// Both backends (local filesystem, Google Cloud Storage) implement this trait so the
/// ingestion pipeline never needs to know which one is active.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Store `data` as `filename` within `category`.
    ///
    /// The returned address is sufficient to read or delete the object later, without
    /// consulting configuration.
    async fn store(
        &self,
        category: AssetCategory,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile>;

    /// Read back the bytes behind an address
    async fn read(&self, address: &StorageAddress) -> StorageResult<Vec<u8>>;

    /// Delete the object behind an address.
    ///
    /// Deleting an object that no longer exists succeeds.
    async fn delete(&self, address: &StorageAddress) -> StorageResult<()>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
