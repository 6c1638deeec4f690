use modshop_core::{AppError, ModelFormat};

use super::types::{IngestRequest, UploadLimits, UploadedFile};

/// Upload validation errors
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("Name, model (.glb/.gltf) and thumbnail image are required")]
    MissingField(&'static str),

    #[error("Model must be a .glb or .gltf file")]
    UnsupportedModelFormat(String),

    #[error("Empty file: {0}")]
    EmptyFile(&'static str),

    #[error("File too large: {field} is {size} bytes (max: {max} bytes)")]
    FileTooLarge {
        field: &'static str,
        size: usize,
        max: usize,
    },
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::FileTooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            other => AppError::InvalidInput(other.to_string()),
        }
    }
}

/// A request that passed validation
#[derive(Debug)]
pub struct ValidatedUpload<'a> {
    /// Trimmed, non-empty
    pub name: &'a str,
    /// Trimmed; `None` when blank
    pub description: Option<&'a str>,
    pub model: &'a UploadedFile,
    pub format: ModelFormat,
    pub thumbnail: &'a UploadedFile,
}

/// Checks an ingest request without touching storage
pub struct UploadValidator {
    limits: UploadLimits,
}

impl UploadValidator {
    pub fn new(limits: UploadLimits) -> Self {
        Self { limits }
    }

    fn validate_size(
        field: &'static str,
        file: &UploadedFile,
        max: usize,
    ) -> Result<(), ValidationError> {
        let size = file.data.len();
        if size == 0 {
            return Err(ValidationError::EmptyFile(field));
        }
        if size > max {
            return Err(ValidationError::FileTooLarge { field, size, max });
        }
        Ok(())
    }

    pub fn validate<'a>(
        &self,
        request: &'a IngestRequest,
    ) -> Result<ValidatedUpload<'a>, ValidationError> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        let model = request
            .model
            .as_ref()
            .ok_or(ValidationError::MissingField("model"))?;
        let thumbnail = request
            .thumbnail
            .as_ref()
            .ok_or(ValidationError::MissingField("thumbnail"))?;

        let format = ModelFormat::from_filename(&model.filename)
            .ok_or_else(|| ValidationError::UnsupportedModelFormat(model.filename.clone()))?;

        Self::validate_size("model", model, self.limits.max_model_size)?;
        Self::validate_size("thumbnail", thumbnail, self.limits.max_thumbnail_size)?;

        let description = request
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        Ok(ValidatedUpload {
            name,
            description,
            model,
            format,
            thumbnail,
        })
    }
}
