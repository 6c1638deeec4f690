//! Axis-aligned bounds from binary glTF (GLB) containers.
//!
//! Only accessor `min`/`max` metadata of `POSITION` attributes is consulted, so the cost does
//! not depend on vertex count and the binary chunk is never decoded. The JSON chunk is read
//! through a deliberately small view of the document: everything else in it, including
//! references that do not resolve, is ignored rather than rejected.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

const GLB_MAGIC: &[u8; 4] = b"glTF";
const POSITION: &str = "POSITION";

/// Three-axis min/max over sampled vertex positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: [f64; 3],
    pub max: [f64; 3],
}

impl BoundingBox {
    /// Box with no samples; never a valid extent
    pub const EMPTY: BoundingBox = BoundingBox {
        min: [f64::INFINITY; 3],
        max: [f64::NEG_INFINITY; 3],
    };

    /// True when no axis received a finite sample.
    pub fn is_empty(&self) -> bool {
        (0..3).all(|axis| !(self.min[axis] <= self.max[axis]))
    }

    /// Widen the box with one accessor's declared bounds. Non-finite values are skipped per
    /// axis.
    pub fn include(&mut self, min: [f64; 3], max: [f64; 3]) {
        for axis in 0..3 {
            if min[axis].is_finite() {
                self.min[axis] = self.min[axis].min(min[axis]);
            }
            if max[axis].is_finite() {
                self.max[axis] = self.max[axis].max(max[axis]);
            }
        }
    }

    /// `max - min` per axis. Axes without a finite size count as 0.
    pub fn extent(&self) -> Option<[f64; 3]> {
        if self.is_empty() {
            return None;
        }
        let mut extent = [0.0; 3];
        for axis in 0..3 {
            let size = self.max[axis] - self.min[axis];
            extent[axis] = if size.is_finite() { size } else { 0.0 };
        }
        Some(extent)
    }

    /// Largest axis of the extent
    pub fn max_dimension(&self) -> Option<f64> {
        self.extent()
            .map(|extent| extent.into_iter().fold(0.0, f64::max))
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        BoundingBox::EMPTY
    }
}

/// Whether the buffer starts with the binary glTF magic.
pub fn is_binary_container(data: &[u8]) -> bool {
    data.starts_with(GLB_MAGIC)
}

#[derive(Debug, Default, Deserialize)]
struct DocumentView {
    #[serde(default)]
    meshes: Vec<MeshView>,
    #[serde(default)]
    accessors: Vec<AccessorView>,
}

#[derive(Debug, Default, Deserialize)]
struct MeshView {
    #[serde(default)]
    primitives: Vec<PrimitiveView>,
}

#[derive(Debug, Default, Deserialize)]
struct PrimitiveView {
    #[serde(default)]
    attributes: HashMap<String, Value>,
}

#[derive(Debug, Default, Deserialize)]
struct AccessorView {
    #[serde(default)]
    min: Option<Vec<Value>>,
    #[serde(default)]
    max: Option<Vec<Value>>,
}

/// Three components of an accessor bound; anything that is not a number becomes NaN.
fn vec3(values: &[Value]) -> Option<[f64; 3]> {
    if values.len() != 3 {
        return None;
    }
    let component = |v: &Value| v.as_f64().unwrap_or(f64::NAN);
    Some([
        component(&values[0]),
        component(&values[1]),
        component(&values[2]),
    ])
}

fn bounds_from_document(document: &DocumentView) -> BoundingBox {
    let mut bounds = BoundingBox::EMPTY;

    for (mesh_index, mesh) in document.meshes.iter().enumerate() {
        for (primitive_index, primitive) in mesh.primitives.iter().enumerate() {
            let Some(accessor_index) = primitive
                .attributes
                .get(POSITION)
                .and_then(Value::as_u64)
            else {
                tracing::debug!(
                    mesh = mesh_index,
                    primitive = primitive_index,
                    "Primitive has no POSITION attribute"
                );
                continue;
            };

            let Some(accessor) = usize::try_from(accessor_index)
                .ok()
                .and_then(|index| document.accessors.get(index))
            else {
                tracing::debug!(
                    mesh = mesh_index,
                    primitive = primitive_index,
                    accessor = accessor_index,
                    "POSITION accessor does not exist"
                );
                continue;
            };

            let declared = accessor
                .min
                .as_deref()
                .and_then(vec3)
                .zip(accessor.max.as_deref().and_then(vec3));

            match declared {
                Some((min, max)) => bounds.include(min, max),
                None => tracing::debug!(
                    mesh = mesh_index,
                    primitive = primitive_index,
                    "POSITION accessor has no usable min/max"
                ),
            }
        }
    }

    bounds
}

/// Aggregate bounds over every mesh primitive's `POSITION` accessor.
///
/// Returns `None` for anything that is not a well-framed binary container, for documents
/// that cannot be read, and when no primitive contributed a finite bound.
pub fn extract_bounds(data: &[u8]) -> Option<BoundingBox> {
    if !is_binary_container(data) {
        tracing::debug!(size_bytes = data.len(), "Not a binary glTF container");
        return None;
    }

    let glb = match gltf::Glb::from_slice(data) {
        Ok(glb) => glb,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read binary glTF container");
            return None;
        }
    };

    let document: DocumentView = match serde_json::from_slice(&glb.json) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to parse glTF JSON chunk");
            return None;
        }
    };

    let bounds = bounds_from_document(&document);
    if bounds.is_empty() {
        None
    } else {
        Some(bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(json: &str) -> DocumentView {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_empty_box() {
        assert!(BoundingBox::EMPTY.is_empty());
        assert_eq!(BoundingBox::EMPTY.extent(), None);
        assert_eq!(BoundingBox::default(), BoundingBox::EMPTY);
    }

    #[test]
    fn test_include_skips_non_finite_axes() {
        let mut bounds = BoundingBox::EMPTY;
        bounds.include([-1.0, f64::NAN, 0.0], [1.0, f64::INFINITY, 4.0]);
        assert!(!bounds.is_empty());
        assert_eq!(bounds.extent(), Some([2.0, 0.0, 4.0]));
        assert_eq!(bounds.max_dimension(), Some(4.0));
    }

    #[test]
    fn test_aggregates_across_meshes_and_primitives() {
        let doc = document(
            r#"{
                "meshes": [
                    {"primitives": [{"attributes": {"POSITION": 0}}, {"attributes": {"NORMAL": 2}}]},
                    {"primitives": [{"attributes": {"POSITION": 1}}]}
                ],
                "accessors": [
                    {"min": [-1, -2, -3], "max": [1, 2, 3]},
                    {"min": [0, -5, 0], "max": [10, 0, 1]},
                    {"min": [-100, -100, -100], "max": [100, 100, 100]}
                ]
            }"#,
        );
        let bounds = bounds_from_document(&doc);
        assert_eq!(bounds.min, [-1.0, -5.0, -3.0]);
        assert_eq!(bounds.max, [10.0, 2.0, 3.0]);
    }

    #[test]
    fn test_ignores_unusable_accessors() {
        let doc = document(
            r#"{
                "meshes": [{"primitives": [
                    {"attributes": {"POSITION": 0}},
                    {"attributes": {"POSITION": 1}},
                    {"attributes": {"POSITION": 7}}
                ]}],
                "accessors": [
                    {"min": [0, 0], "max": [1, 1]},
                    {"max": [1, 1, 1]}
                ]
            }"#,
        );
        assert!(bounds_from_document(&doc).is_empty());
    }

    #[test]
    fn test_null_components_are_skipped() {
        let doc = document(
            r#"{
                "meshes": [{"primitives": [{"attributes": {"POSITION": 0}}]}],
                "accessors": [{"min": [null, 0, 0], "max": [null, 2, 1]}]
            }"#,
        );
        let bounds = bounds_from_document(&doc);
        assert_eq!(bounds.extent(), Some([0.0, 2.0, 1.0]));
    }

    #[test]
    fn test_rejects_non_binary_input() {
        assert!(!is_binary_container(b"{\"asset\":{}}"));
        assert!(!is_binary_container(b"glT"));
        assert!(is_binary_container(b"glTF\x02\x00\x00\x00"));
        assert_eq!(extract_bounds(b"{\"asset\":{\"version\":\"2.0\"}}"), None);
        assert_eq!(extract_bounds(b"glTF garbage"), None);
        assert_eq!(extract_bounds(&[]), None);
    }
}
