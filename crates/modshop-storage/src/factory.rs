use crate::backend::StorageRouter;
use crate::gcs::GcsStorage;
use crate::local::LocalStorage;
use crate::traits::{StorageError, StorageResult};
use crate::StorageBackend;
use modshop_core::Config;

/// Create the storage router from configuration
///
/// The local backend is always available. The GCS backend is built whenever its settings
/// are present, so cloud addresses stay deletable after switching back to local storage.
/// With `USE_GCP=true` missing or broken GCS settings are an error.
pub fn create_storage(config: &Config) -> StorageResult<StorageRouter> {
    let active = config.storage_backend();
    let local = LocalStorage::new(&config.local.root, config.local.public_base_url.clone());

    let gcs = match (&config.gcs, active) {
        (Some(gcs_config), StorageBackend::Gcs) => Some(GcsStorage::new(gcs_config)?),
        (Some(gcs_config), StorageBackend::Local) => match GcsStorage::new(gcs_config) {
            Ok(storage) => Some(storage),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "GCS settings present but client could not be built; cloud addresses cannot be deleted"
                );
                None
            }
        },
        (None, StorageBackend::Gcs) => {
            return Err(StorageError::ConfigError(
                "USE_GCP is true but GCS_BUCKET, GCP_PROJECT_ID, GCP_CLIENT_EMAIL and GCP_PRIVATE_KEY are not all set"
                    .to_string(),
            ))
        }
        (None, StorageBackend::Local) => None,
    };

    tracing::info!(
        backend = %active,
        local_root = %config.local.root.display(),
        gcs_available = gcs.is_some(),
        "Storage initialized"
    );

    StorageRouter::new(active, local, gcs)
}
