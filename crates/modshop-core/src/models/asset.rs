//! Asset models: the categories files are stored under, the supported model containers and
//! the record-creation input handed to metadata persistence.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

use super::storage::StorageAddress;

/// Kind of file belonging to an asset. Each category has its own directory (local) or key
/// segment (cloud).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Models,
    Thumbnails,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 2] = [AssetCategory::Models, AssetCategory::Thumbnails];

    pub fn dir_name(&self) -> &'static str {
        match self {
            AssetCategory::Models => "models",
            AssetCategory::Thumbnails => "thumbnails",
        }
    }

    pub fn from_dir_name(name: &str) -> Option<Self> {
        AssetCategory::ALL
            .into_iter()
            .find(|category| category.dir_name() == name)
    }
}

impl Display for AssetCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.dir_name())
    }
}

/// Supported 3D model containers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelFormat {
    /// Single-file binary container; the only variant bounds can be extracted from
    Glb,
    /// JSON document referencing companion buffer files
    Gltf,
}

impl ModelFormat {
    /// Detect the format from a filename's extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Option<Self> {
        let lower = filename.to_lowercase();
        if lower.ends_with(".gltf") {
            Some(ModelFormat::Gltf)
        } else if lower.ends_with(".glb") {
            Some(ModelFormat::Glb)
        } else {
            None
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ModelFormat::Glb => "glb",
            ModelFormat::Gltf => "gltf",
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            ModelFormat::Glb => "model/gltf-binary",
            ModelFormat::Gltf => "model/gltf+json",
        }
    }

    pub fn is_binary(&self) -> bool {
        matches!(self, ModelFormat::Glb)
    }
}

impl Display for ModelFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.extension())
    }
}

/// Fields needed to create an asset record after a successful ingestion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub model_url: String,
    pub model_address: StorageAddress,
    pub thumbnail_url: String,
    pub thumbnail_address: StorageAddress,
    pub format: ModelFormat,
    pub size_bytes: u64,
    pub scale: f64,
}
