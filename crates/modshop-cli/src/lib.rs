use std::path::Path;

use modshop_processing::geometry::scale::{auto_scale, resolve_scale};
use modshop_processing::geometry::ScaleSource;
use modshop_processing::{extract_bounds, is_binary_container, BoundingBox};
use serde::Serialize;

/// Guess an image content type from a file extension. Unknown extensions give an empty
/// string, which lets ingestion derive `image/<ext>` itself.
pub fn image_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("avif") => "image/avif",
        _ => "",
    }
}

/// Geometry summary printed by `modshop inspect`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectReport {
    pub binary_container: bool,
    pub min: Option<[f64; 3]>,
    pub max: Option<[f64; 3]>,
    pub extent: Option<[f64; 3]>,
    pub scale: f64,
    pub scale_source: &'static str,
}

pub fn inspect_model(data: &[u8], scale_override: Option<&str>) -> InspectReport {
    let bounds: Option<BoundingBox> = extract_bounds(data);
    let scale = resolve_scale(auto_scale(bounds.as_ref()), scale_override);

    InspectReport {
        binary_container: is_binary_container(data),
        min: bounds.map(|b| b.min),
        max: bounds.map(|b| b.max),
        extent: bounds.and_then(|b| b.extent()),
        scale: scale.value,
        scale_source: match scale.source {
            ScaleSource::Default => "default",
            ScaleSource::Auto => "auto",
            ScaleSource::Manual => "manual",
        },
    }
}

/// Initialize tracing for CLI binaries.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
}
