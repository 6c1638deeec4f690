//! Types for the ingestion pipeline.

use bytes::Bytes;
use modshop_core::Config;

/// One uploaded file with its declared metadata
#[derive(Clone, Debug)]
pub struct UploadedFile {
    pub filename: String,
    /// Declared content type; may be empty
    pub content_type: String,
    pub data: Bytes,
}

impl UploadedFile {
    pub fn new(
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: impl Into<Bytes>,
    ) -> Self {
        UploadedFile {
            filename: filename.into(),
            content_type: content_type.into(),
            data: data.into(),
        }
    }
}

/// Everything submitted to create one asset
#[derive(Clone, Debug, Default)]
pub struct IngestRequest {
    pub name: String,
    pub description: Option<String>,
    pub model: Option<UploadedFile>,
    pub thumbnail: Option<UploadedFile>,
    /// Raw scale override as typed by the operator
    pub scale_override: Option<String>,
}

/// Size limits in bytes
#[derive(Clone, Copy, Debug)]
pub struct UploadLimits {
    pub max_model_size: usize,
    pub max_thumbnail_size: usize,
}

impl UploadLimits {
    pub fn from_config(config: &Config) -> Self {
        UploadLimits {
            max_model_size: config.max_model_size_bytes,
            max_thumbnail_size: config.max_thumbnail_size_bytes,
        }
    }
}

impl Default for UploadLimits {
    fn default() -> Self {
        UploadLimits {
            max_model_size: 200 * 1024 * 1024,
            max_thumbnail_size: 10 * 1024 * 1024,
        }
    }
}
