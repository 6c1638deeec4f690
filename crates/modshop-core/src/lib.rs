//! Modshop Core Library
//!
//! This crate provides the domain models, error types and configuration shared by the
//! storage, processing and CLI crates.

pub mod config;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, GcsConfig, LocalStorageConfig};
pub use error::{AppError, ErrorMetadata, LogLevel};
pub use models::{
    AddressParseError, AssetCategory, ModelFormat, NewAsset, StorageAddress, StoredFile,
};
pub use storage_types::StorageBackend;
