use crate::keys::validate_filename;
use crate::traits::{Storage, StorageError, StorageResult};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use modshop_core::{AssetCategory, StorageAddress, StoredFile};
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
///
/// Files land in `{root}/{category}/{filename}` and are served from
/// `{public_base_url}/{category}/{filename}`.
#[derive(Clone, Debug)]
pub struct LocalStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `root` - Directory holding the category folders (e.g., "public")
    /// * `public_base_url` - Prefix for access URLs; empty gives root-relative URLs
    ///
    /// No directories are created until the first write.
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        LocalStorage {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn category_dir(&self, category: AssetCategory) -> PathBuf {
        self.root.join(category.dir_name())
    }

    fn file_path(&self, category: AssetCategory, filename: &str) -> StorageResult<PathBuf> {
        validate_filename(filename)?;
        Ok(self.category_dir(category).join(filename))
    }

    /// Generate public URL for file
    fn generate_url(&self, category: AssetCategory, filename: &str) -> String {
        format!("{}/{}/{}", self.public_base_url, category, filename)
    }

    /// Paths an address may refer to. Legacy addresses without a category are looked up
    /// in every category directory.
    fn candidate_paths(&self, address: &StorageAddress) -> StorageResult<Vec<PathBuf>> {
        match address {
            StorageAddress::Local {
                category: Some(category),
                filename,
            } => Ok(vec![self.file_path(*category, filename)?]),
            StorageAddress::Local {
                category: None,
                filename,
            } => AssetCategory::ALL
                .iter()
                .map(|category| self.file_path(*category, filename))
                .collect(),
            StorageAddress::Cloud { key } => Err(StorageError::InvalidKey(format!(
                "Address {} does not belong to local storage",
                key
            ))),
        }
    }
}

#[async_trait]
impl Storage for LocalStorage {
    async fn store(
        &self,
        category: AssetCategory,
        filename: &str,
        _content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile> {
        let path = self.file_path(category, filename)?;
        let size = data.len();

        let dir = self.category_dir(category);
        fs::create_dir_all(&dir).await.map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to create directory {}: {}",
                dir.display(),
                e
            ))
        })?;

        let start = std::time::Instant::now();

        let mut file = fs::File::create(&path).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to create file {}: {}", path.display(), e))
        })?;

        file.write_all(&data).await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to write file {}: {}", path.display(), e))
        })?;

        file.sync_all().await.map_err(|e| {
            StorageError::UploadFailed(format!("Failed to sync file {}: {}", path.display(), e))
        })?;

        let url = self.generate_url(category, filename);

        tracing::info!(
            path = %path.display(),
            category = %category,
            size_bytes = size,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredFile {
            access_url: url,
            address: StorageAddress::local(category, filename),
            byte_size: size as u64,
        })
    }

    async fn read(&self, address: &StorageAddress) -> StorageResult<Vec<u8>> {
        for path in self.candidate_paths(address)? {
            match fs::read(&path).await {
                Ok(data) => return Ok(data),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    return Err(StorageError::DownloadFailed(format!(
                        "Failed to read file {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        Err(StorageError::NotFound(address.to_string()))
    }

    async fn delete(&self, address: &StorageAddress) -> StorageResult<()> {
        let mut removed = false;

        for path in self.candidate_paths(address)? {
            match fs::remove_file(&path).await {
                Ok(()) => {
                    removed = true;
                    tracing::info!(path = %path.display(), "Local storage delete successful");
                }
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(StorageError::DeleteFailed(format!(
                        "Failed to delete file {}: {}",
                        path.display(),
                        e
                    )))
                }
            }
        }

        if !removed {
            tracing::debug!(address = %address, "Local file already absent");
        }

        Ok(())
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
