//! Configuration module
//!
//! Storage selection, backend settings and upload limits, read from the environment.

use std::env;
use std::path::PathBuf;

use crate::models::LOCAL_MARKER;
use crate::storage_types::StorageBackend;

const MAX_MODEL_SIZE_MB: usize = 200;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const GCS_KEY_PREFIX: &str = "mod-shop";
const LOCAL_STORAGE_ROOT: &str = "public";

/// Local filesystem backend settings
#[derive(Clone, Debug)]
pub struct LocalStorageConfig {
    /// Directory holding the `models/` and `thumbnails/` folders
    pub root: PathBuf,
    /// Prefix for access URLs. Empty means root-relative (`/models/<file>`).
    pub public_base_url: String,
}

/// Google Cloud Storage backend settings
#[derive(Clone, Debug)]
pub struct GcsConfig {
    pub bucket: String,
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    pub key_prefix: String,
}

impl GcsConfig {
    /// Service-account key document in the shape the GCS client expects.
    pub fn service_account_key(&self) -> String {
        serde_json::json!({
            "type": "service_account",
            "project_id": self.project_id,
            "private_key_id": "",
            "private_key": self.private_key,
            "client_email": self.client_email,
        })
        .to_string()
    }
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub use_gcp: bool,
    pub local: LocalStorageConfig,
    /// Present only when every GCS variable is set. Whether its absence is an error is
    /// decided when the storage backend is created.
    pub gcs: Option<GcsConfig>,
    pub max_model_size_bytes: usize,
    pub max_thumbnail_size_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_vars<F>(var: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| var(key).filter(|v| !v.trim().is_empty());

        let use_gcp = var("USE_GCP")
            .map(|v| v.trim().eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let local = LocalStorageConfig {
            root: PathBuf::from(
                non_empty("LOCAL_STORAGE_ROOT").unwrap_or_else(|| LOCAL_STORAGE_ROOT.to_string()),
            ),
            public_base_url: var("LOCAL_PUBLIC_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .unwrap_or_default(),
        };

        let gcs = match (
            non_empty("GCS_BUCKET"),
            non_empty("GCP_PROJECT_ID"),
            non_empty("GCP_CLIENT_EMAIL"),
            non_empty("GCP_PRIVATE_KEY"),
        ) {
            (Some(bucket), Some(project_id), Some(client_email), Some(private_key)) => {
                Some(GcsConfig {
                    bucket,
                    project_id,
                    client_email,
                    // Env files usually carry the PEM with literal "\n" sequences
                    private_key: private_key.replace("\\n", "\n"),
                    key_prefix: var("GCS_KEY_PREFIX")
                        .map(|p| p.trim().trim_matches('/').to_string())
                        .unwrap_or_else(|| GCS_KEY_PREFIX.to_string()),
                })
            }
            _ => None,
        };

        let max_model_size_bytes = parse_megabytes(var("MAX_MODEL_SIZE_MB"), MAX_MODEL_SIZE_MB)?;
        let max_thumbnail_size_bytes =
            parse_megabytes(var("MAX_THUMBNAIL_SIZE_MB"), MAX_THUMBNAIL_SIZE_MB)?;

        let config = Config {
            use_gcp,
            local,
            gcs,
            max_model_size_bytes,
            max_thumbnail_size_bytes,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.max_model_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_MODEL_SIZE_MB must be greater than zero"));
        }
        if self.max_thumbnail_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_THUMBNAIL_SIZE_MB must be greater than zero"
            ));
        }
        if let Some(gcs) = &self.gcs {
            // Keys under this prefix would read back as local addresses
            if gcs.key_prefix.starts_with(LOCAL_MARKER) {
                return Err(anyhow::anyhow!(
                    "GCS_KEY_PREFIX must not start with {}",
                    LOCAL_MARKER
                ));
            }
        }
        Ok(())
    }

    /// Backend that receives new uploads.
    pub fn storage_backend(&self) -> StorageBackend {
        StorageBackend::from_use_gcp(self.use_gcp)
    }
}

fn parse_megabytes(raw: Option<String>, default_mb: usize) -> Result<usize, anyhow::Error> {
    let mb = match raw {
        Some(value) => value
            .trim()
            .parse::<usize>()
            .map_err(|_| anyhow::anyhow!("Invalid size limit: {}", value))?,
        None => default_mb,
    };
    mb.checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("Size limit too large: {} MB", mb))
}
