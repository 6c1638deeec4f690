use crate::acl::PublicReadGrant;
use crate::keys::{encode_key_for_url, object_key, validate_filename};
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use modshop_core::models::LOCAL_MARKER;
use modshop_core::{AssetCategory, GcsConfig, StorageAddress, StoredFile};
use object_store::gcp::GoogleCloudStorageBuilder;
use object_store::path::Path;
use object_store::Error as ObjectStoreError;
use object_store::{
    Attribute, Attributes, ObjectStore, ObjectStoreExt, PutOptions, PutPayload,
    Result as ObjectResult,
};
use std::sync::Arc;

/// Cache policy applied to every uploaded object. Filenames embed a timestamp, so content
/// behind a URL never changes.
pub const CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// Google Cloud Storage implementation
#[derive(Clone)]
pub struct GcsStorage {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    key_prefix: String,
    public_read: Option<PublicReadGrant>,
}

impl GcsStorage {
    /// Create a new GcsStorage instance from service-account settings
    pub fn new(config: &GcsConfig) -> StorageResult<Self> {
        let gcs = GoogleCloudStorageBuilder::from_env()
            .with_bucket_name(config.bucket.clone())
            .with_service_account_key(config.service_account_key())
            .build()
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let public_read = PublicReadGrant::new(config.bucket.clone(), Arc::clone(gcs.credentials()));

        Ok(GcsStorage {
            store: Arc::new(gcs),
            bucket: config.bucket.clone(),
            key_prefix: config.key_prefix.clone(),
            public_read: Some(public_read),
        })
    }

    /// Wrap an arbitrary object store. No public-read grants are issued.
    pub fn with_store(
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
        key_prefix: impl Into<String>,
    ) -> Self {
        GcsStorage {
            store,
            bucket: bucket.into(),
            key_prefix: key_prefix.into(),
            public_read: None,
        }
    }

    /// Generate public URL for an object
    ///
    /// Format: https://{bucket}.storage.googleapis.com/{key}
    fn generate_url(&self, key: &str) -> String {
        format!(
            "https://{}.storage.googleapis.com/{}",
            self.bucket,
            encode_key_for_url(key)
        )
    }

    fn cloud_key<'a>(&self, address: &'a StorageAddress) -> StorageResult<&'a str> {
        match address {
            StorageAddress::Cloud { key } => Ok(key),
            StorageAddress::Local { .. } => Err(StorageError::InvalidKey(format!(
                "Address {} does not belong to cloud storage",
                address
            ))),
        }
    }
}

#[async_trait]
impl Storage for GcsStorage {
    async fn store(
        &self,
        category: AssetCategory,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile> {
        validate_filename(filename)?;
        let key = object_key(&self.key_prefix, category, filename);
        if key.starts_with(LOCAL_MARKER) {
            // Would persist as a local address and never route back here
            return Err(StorageError::InvalidKey(format!(
                "Object key {} starts with {}",
                key, LOCAL_MARKER
            )));
        }
        let size = data.len() as u64;
        let location = Path::from(key.clone());

        let mut attributes = Attributes::new();
        attributes.insert(Attribute::ContentType, content_type.to_string().into());
        attributes.insert(Attribute::CacheControl, CACHE_CONTROL.into());
        let options = PutOptions {
            attributes,
            ..Default::default()
        };

        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self
            .store
            .put_opts(&location, PutPayload::from(data), options)
            .await;

        result.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %key,
                size_bytes = size,
                duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                "GCS upload failed"
            );
            StorageError::UploadFailed(e.to_string())
        })?;

        if let Some(grant) = &self.public_read {
            if let Err(e) = grant.grant(&key).await {
                // The object stays usable if the bucket already serves it publicly
                tracing::warn!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "Failed to make object public"
                );
            }
        }

        let url = self.generate_url(&key);

        tracing::info!(
            bucket = %self.bucket,
            key = %key,
            content_type = %content_type,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "GCS upload successful"
        );

        Ok(StoredFile {
            access_url: url,
            address: StorageAddress::cloud(key),
            byte_size: size,
        })
    }

    async fn read(&self, address: &StorageAddress) -> StorageResult<Vec<u8>> {
        let key = self.cloud_key(address)?;
        let location = Path::from(key.to_string());
        let start = std::time::Instant::now();

        let result: ObjectResult<_> = self.store.get(&location).await;

        let result = result.map_err(|e| match e {
            ObjectStoreError::NotFound { .. } => StorageError::NotFound(key.to_string()),
            other => {
                tracing::error!(
                    error = %other,
                    bucket = %self.bucket,
                    key = %key,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "GCS download failed"
                );
                StorageError::DownloadFailed(other.to_string())
            }
        })?;

        let bytes = result
            .bytes()
            .await
            .map_err(|e| StorageError::DownloadFailed(e.to_string()))?;

        Ok(bytes.to_vec())
    }

    async fn delete(&self, address: &StorageAddress) -> StorageResult<()> {
        let key = self.cloud_key(address)?;
        let location = Path::from(key.to_string());

        let result: ObjectResult<_> = self.store.delete(&location).await;

        match result {
            Ok(()) => {
                tracing::info!(bucket = %self.bucket, key = %key, "GCS delete successful");
                Ok(())
            }
            Err(ObjectStoreError::NotFound { .. }) => {
                tracing::debug!(bucket = %self.bucket, key = %key, "GCS object already absent");
                Ok(())
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    bucket = %self.bucket,
                    key = %key,
                    "GCS delete failed"
                );
                Err(StorageError::DeleteFailed(e.to_string()))
            }
        }
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Gcs
    }
}
