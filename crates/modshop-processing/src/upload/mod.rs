//! Asset ingestion: validate → store model → derive scale → store thumbnail.

pub mod naming;
pub mod pipeline;
pub mod types;
pub mod validator;

pub use pipeline::AssetIngestor;
pub use types::{IngestRequest, UploadLimits, UploadedFile};
pub use validator::{UploadValidator, ValidatedUpload, ValidationError};
