use std::fmt::{Display, Formatter, Result as FmtResult};

/// Storage backend types
///
/// Selects where new uploads are written. Deletion never consults this value; it routes by
/// the stored address instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Local,
    Gcs,
}

impl StorageBackend {
    /// Map the boolean `USE_GCP` flag onto a backend kind.
    pub fn from_use_gcp(use_gcp: bool) -> Self {
        if use_gcp {
            StorageBackend::Gcs
        } else {
            StorageBackend::Local
        }
    }
}

impl Display for StorageBackend {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageBackend::Local => write!(f, "local"),
            StorageBackend::Gcs => write!(f, "gcs"),
        }
    }
}
