//! Model geometry: bounding boxes read from binary glTF containers and the scale factor
//! derived from them.

pub mod bounds;
pub mod scale;

pub use bounds::{extract_bounds, is_binary_container, BoundingBox};
pub use scale::{NormalizedScale, ScaleSource};
