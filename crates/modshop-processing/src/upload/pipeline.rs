//! Ingestion pipeline: validate → store model → derive scale → store thumbnail.
//!
//! Validation happens before any storage call, so a rejected request leaves nothing behind.
//! A failed thumbnail write does leave the already-stored model in place; the error is logged
//! with the model address so it can be cleaned up.

use std::sync::Arc;

use modshop_core::{AppError, AssetCategory, ModelFormat, NewAsset};
use modshop_storage::Storage;

use super::naming::{
    generated_filename, thumbnail_content_type, thumbnail_extension, timestamp_millis,
    MODEL_FALLBACK_SLUG, THUMBNAIL_FALLBACK_SLUG,
};
use super::types::{IngestRequest, UploadLimits};
use super::validator::UploadValidator;
use crate::geometry::bounds::extract_bounds;
use crate::geometry::scale::{auto_scale, resolve_scale, NormalizedScale};

/// Turns an ingest request into stored files and a record-creation payload
#[derive(Clone)]
pub struct AssetIngestor {
    storage: Arc<dyn Storage>,
    limits: UploadLimits,
}

impl AssetIngestor {
    pub fn new(storage: Arc<dyn Storage>, limits: UploadLimits) -> Self {
        Self { storage, limits }
    }

    fn compute_scale(format: ModelFormat, data: &[u8]) -> NormalizedScale {
        if !format.is_binary() {
            return NormalizedScale::default_scale();
        }
        let bounds = extract_bounds(data);
        if bounds.is_none() {
            tracing::warn!(
                size_bytes = data.len(),
                "No usable bounds in model; using default scale"
            );
        }
        auto_scale(bounds.as_ref())
    }

    pub async fn ingest(&self, request: IngestRequest) -> Result<NewAsset, AppError> {
        let validated = UploadValidator::new(self.limits).validate(&request)?;
        let start = std::time::Instant::now();

        let model_filename = generated_filename(
            validated.name,
            MODEL_FALLBACK_SLUG,
            validated.format.extension(),
            timestamp_millis(),
        );
        let model = self
            .storage
            .store(
                AssetCategory::Models,
                &model_filename,
                validated.format.content_type(),
                validated.model.data.clone(),
            )
            .await
            .map_err(|e| {
                tracing::error!(error = %e, filename = %model_filename, "Model upload failed");
                AppError::from(e)
            })?;

        let computed = Self::compute_scale(validated.format, &validated.model.data);
        let scale = resolve_scale(computed, request.scale_override.as_deref());

        let thumbnail_ext = thumbnail_extension(
            &validated.thumbnail.filename,
            &validated.thumbnail.content_type,
        );
        let thumbnail_filename = generated_filename(
            validated.name,
            THUMBNAIL_FALLBACK_SLUG,
            &thumbnail_ext,
            timestamp_millis(),
        );
        let thumbnail = self
            .storage
            .store(
                AssetCategory::Thumbnails,
                &thumbnail_filename,
                &thumbnail_content_type(&validated.thumbnail.content_type, &thumbnail_ext),
                validated.thumbnail.data.clone(),
            )
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    filename = %thumbnail_filename,
                    orphaned_model = %model.address,
                    "Thumbnail upload failed"
                );
                AppError::from(e)
            })?;

        tracing::info!(
            name = %validated.name,
            format = %validated.format,
            model_address = %model.address,
            thumbnail_address = %thumbnail.address,
            size_bytes = model.byte_size,
            scale = scale.value,
            scale_source = ?scale.source,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Asset ingested"
        );

        Ok(NewAsset {
            name: validated.name.to_string(),
            description: validated.description.map(str::to_string),
            model_url: model.access_url,
            model_address: model.address,
            thumbnail_url: thumbnail.access_url,
            thumbnail_address: thumbnail.address,
            format: validated.format,
            size_bytes: model.byte_size,
            scale: scale.value,
        })
    }
}
