//! Modshop Storage Library
//!
//! Storage abstraction with a local filesystem backend and a Google Cloud Storage backend.
//!
//! # Layout
//!
//! - **Local**: `{root}/{category}/{filename}`, addressed as `local:{category}/{filename}`
//! - **GCS**: `{prefix}/{category}/{filename}`, addressed by the object key itself
//!
//! Filenames must be a single path segment. Naming rules live in the `keys` module so both
//! backends stay consistent.

pub mod acl;
pub mod backend;
pub mod factory;
pub(crate) mod keys;
pub mod gcs;
pub mod local;
pub mod traits;

// Re-export commonly used types
pub use acl::PublicReadGrant;
pub use backend::{Backend, StorageRouter};
pub use factory::create_storage;
pub use gcs::{GcsStorage, CACHE_CONTROL};
pub use local::LocalStorage;
pub use modshop_core::StorageBackend;
pub use traits::{Storage, StorageError, StorageResult};
