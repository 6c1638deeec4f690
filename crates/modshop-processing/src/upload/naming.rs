//! Generated storage filenames: `<slug>-<unix millis>.<ext>`.

use std::path::Path;

use chrono::Utc;

pub const MODEL_FALLBACK_SLUG: &str = "model";
pub const THUMBNAIL_FALLBACK_SLUG: &str = "thumbnail";
const DEFAULT_THUMBNAIL_EXTENSION: &str = "jpg";

/// Lowercase ASCII alphanumerics with every other run collapsed to a single `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c);
        } else {
            pending_dash = true;
        }
    }

    slug
}

pub fn generated_filename(name: &str, fallback: &str, extension: &str, timestamp_ms: i64) -> String {
    let slug = slugify(name);
    let base = if slug.is_empty() { fallback } else { slug.as_str() };
    format!("{}-{}.{}", base, timestamp_ms, extension)
}

pub fn timestamp_millis() -> i64 {
    Utc::now().timestamp_millis()
}

fn clean_extension(raw: &str) -> Option<String> {
    let ext: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect::<String>()
        .to_ascii_lowercase();
    if ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}

/// Extension from the filename, else the content-type subtype, else `jpg`.
pub fn thumbnail_extension(filename: &str, content_type: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .and_then(clean_extension)
        .or_else(|| {
            content_type
                .split_once('/')
                .map(|(_, subtype)| subtype.split(';').next().unwrap_or(subtype))
                .and_then(clean_extension)
        })
        .unwrap_or_else(|| DEFAULT_THUMBNAIL_EXTENSION.to_string())
}

/// Declared content type, else `image/<ext>`.
pub fn thumbnail_content_type(declared: &str, extension: &str) -> String {
    let declared = declared.trim();
    if declared.is_empty() {
        format!("image/{}", extension)
    } else {
        declared.to_string()
    }
}
