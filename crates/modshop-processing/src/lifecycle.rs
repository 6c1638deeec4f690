//! Best-effort removal of an asset's stored files.
//!
//! Record deletion must never be blocked by storage, so every failure here is logged and
//! reported instead of returned.

use modshop_storage::Storage;

use modshop_core::StorageAddress;

/// Which of an asset's files were confirmed deleted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CleanupReport {
    pub model_deleted: bool,
    pub thumbnail_deleted: bool,
}

impl CleanupReport {
    pub fn is_complete(&self) -> bool {
        self.model_deleted && self.thumbnail_deleted
    }
}

/// Delete one stored file by its persisted address string. Returns whether the delete
/// succeeded.
pub async fn delete_stored_file(storage: &dyn Storage, address: &str) -> bool {
    let parsed: StorageAddress = match address.parse() {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::warn!(error = %e, address = %address, "Skipping unparseable storage address");
            return false;
        }
    };

    match storage.delete(&parsed).await {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(
                error = %e,
                address = %parsed,
                backend = %parsed.backend(),
                "Failed to delete stored file"
            );
            false
        }
    }
}

/// Delete an asset's model and thumbnail
pub async fn delete_asset_files(
    storage: &dyn Storage,
    model_address: &str,
    thumbnail_address: &str,
) -> CleanupReport {
    let report = CleanupReport {
        model_deleted: delete_stored_file(storage, model_address).await,
        thumbnail_deleted: delete_stored_file(storage, thumbnail_address).await,
    };

    if !report.is_complete() {
        tracing::warn!(
            model_address = %model_address,
            thumbnail_address = %thumbnail_address,
            model_deleted = report.model_deleted,
            thumbnail_deleted = report.thumbnail_deleted,
            "Asset files were not fully removed"
        );
    }

    report
}
