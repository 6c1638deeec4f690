//! Scale normalization.
//!
//! Models are scaled so their largest dimension is about [`TARGET_MAX_DIMENSION`] scene units.
//! Operators can override the computed value; overrides use a wider clamp range than
//! computed values.

use super::bounds::BoundingBox;

pub const TARGET_MAX_DIMENSION: f64 = 2.5;
pub const AUTO_SCALE_MIN: f64 = 0.001;
pub const AUTO_SCALE_MAX: f64 = 100.0;
pub const MANUAL_SCALE_MIN: f64 = 0.0001;
pub const MANUAL_SCALE_MAX: f64 = 10000.0;
pub const DEFAULT_SCALE: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleSource {
    /// No usable geometry
    Default,
    /// Derived from the bounding box
    Auto,
    /// Operator override
    Manual,
}

/// Final scale plus where it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedScale {
    pub value: f64,
    pub source: ScaleSource,
}

impl NormalizedScale {
    pub fn default_scale() -> Self {
        NormalizedScale {
            value: DEFAULT_SCALE,
            source: ScaleSource::Default,
        }
    }
}

/// Scale that fits the box's largest dimension to the target size.
pub fn auto_scale(bounds: Option<&BoundingBox>) -> NormalizedScale {
    let Some(max_dim) = bounds.and_then(BoundingBox::max_dimension) else {
        return NormalizedScale::default_scale();
    };

    if max_dim <= 0.0 {
        return NormalizedScale::default_scale();
    }

    NormalizedScale {
        value: (TARGET_MAX_DIMENSION / max_dim).clamp(AUTO_SCALE_MIN, AUTO_SCALE_MAX),
        source: ScaleSource::Auto,
    }
}

/// Clamp an operator-supplied scale. Non-finite and non-positive values are rejected.
pub fn manual_scale(value: f64) -> Option<f64> {
    if value.is_finite() && value > 0.0 {
        Some(value.clamp(MANUAL_SCALE_MIN, MANUAL_SCALE_MAX))
    } else {
        None
    }
}

/// Parse a textual override. Blank or unparseable input yields `None`.
pub fn parse_scale_override(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().and_then(manual_scale)
}

/// Apply an optional override on top of the computed scale.
pub fn resolve_scale(computed: NormalizedScale, override_raw: Option<&str>) -> NormalizedScale {
    match override_raw.and_then(parse_scale_override) {
        Some(value) => NormalizedScale {
            value,
            source: ScaleSource::Manual,
        },
        None => computed,
    }
}
