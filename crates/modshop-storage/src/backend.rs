//! Backend selection and address routing.
//!
//! New uploads go to the active backend. Reads and deletes follow the backend recorded in the
//! address, so files written under a previous configuration stay reachable.

use async_trait::async_trait;
use bytes::Bytes;
use modshop_core::{AssetCategory, StorageAddress, StoredFile};

use crate::gcs::GcsStorage;
use crate::local::LocalStorage;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;

/// One concrete storage backend
#[derive(Clone)]
pub enum Backend {
    Local(LocalStorage),
    Gcs(GcsStorage),
}

#[async_trait]
impl Storage for Backend {
    async fn store(
        &self,
        category: AssetCategory,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile> {
        match self {
            Backend::Local(storage) => storage.store(category, filename, content_type, data).await,
            Backend::Gcs(storage) => storage.store(category, filename, content_type, data).await,
        }
    }

    async fn read(&self, address: &StorageAddress) -> StorageResult<Vec<u8>> {
        match self {
            Backend::Local(storage) => storage.read(address).await,
            Backend::Gcs(storage) => storage.read(address).await,
        }
    }

    async fn delete(&self, address: &StorageAddress) -> StorageResult<()> {
        match self {
            Backend::Local(storage) => storage.delete(address).await,
            Backend::Gcs(storage) => storage.delete(address).await,
        }
    }

    fn backend_type(&self) -> StorageBackend {
        match self {
            Backend::Local(_) => StorageBackend::Local,
            Backend::Gcs(_) => StorageBackend::Gcs,
        }
    }
}

/// Storage facade handed to the ingestion pipeline
#[derive(Clone)]
pub struct StorageRouter {
    active: StorageBackend,
    local: Backend,
    gcs: Option<Backend>,
}

impl StorageRouter {
    /// Fails when the active backend is GCS but no GCS client is available.
    pub fn new(
        active: StorageBackend,
        local: LocalStorage,
        gcs: Option<GcsStorage>,
    ) -> StorageResult<Self> {
        if active == StorageBackend::Gcs && gcs.is_none() {
            return Err(StorageError::ConfigError(
                "GCS is the active backend but no GCS client is configured".to_string(),
            ));
        }

        Ok(StorageRouter {
            active,
            local: Backend::Local(local),
            gcs: gcs.map(Backend::Gcs),
        })
    }

    /// Backend that receives new uploads
    pub fn active(&self) -> StorageResult<&Backend> {
        self.backend(self.active)
    }

    pub fn backend(&self, kind: StorageBackend) -> StorageResult<&Backend> {
        match kind {
            StorageBackend::Local => Ok(&self.local),
            StorageBackend::Gcs => self
                .gcs
                .as_ref()
                .ok_or(StorageError::BackendUnavailable(StorageBackend::Gcs)),
        }
    }

    /// Backend that owns the addressed object, regardless of which one is active
    pub fn backend_for(&self, address: &StorageAddress) -> StorageResult<&Backend> {
        self.backend(address.backend())
    }
}

#[async_trait]
impl Storage for StorageRouter {
    async fn store(
        &self,
        category: AssetCategory,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile> {
        self.active()?
            .store(category, filename, content_type, data)
            .await
    }

    async fn read(&self, address: &StorageAddress) -> StorageResult<Vec<u8>> {
        self.backend_for(address)?.read(address).await
    }

    async fn delete(&self, address: &StorageAddress) -> StorageResult<()> {
        self.backend_for(address)?.delete(address).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.active
    }
}
