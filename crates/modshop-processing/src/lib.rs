//! Modshop Processing Library
//!
//! Geometry analysis of uploaded models and the asset ingestion pipeline built on top of the
//! storage crate.

pub mod geometry;
pub mod lifecycle;
pub mod upload;

pub use geometry::{extract_bounds, is_binary_container, BoundingBox, NormalizedScale, ScaleSource};
pub use lifecycle::{delete_asset_files, delete_stored_file, CleanupReport};
pub use upload::{
    AssetIngestor, IngestRequest, UploadLimits, UploadValidator, UploadedFile, ValidationError,
};
