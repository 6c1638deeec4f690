//! Public-read grants for cloud objects.
//!
//! The object store client has no notion of object ACLs, so the grant goes straight to the
//! GCS JSON API using the same service-account credentials.

use object_store::gcp::GcpCredentialProvider;
use object_store::CredentialProvider;

use crate::traits::{StorageError, StorageResult};

const GCS_API_BASE: &str = "https://storage.googleapis.com/storage/v1";

#[derive(Clone)]
pub struct PublicReadGrant {
    client: reqwest::Client,
    bucket: String,
    credentials: GcpCredentialProvider,
}

impl PublicReadGrant {
    pub fn new(bucket: impl Into<String>, credentials: GcpCredentialProvider) -> Self {
        PublicReadGrant {
            client: reqwest::Client::new(),
            bucket: bucket.into(),
            credentials,
        }
    }

    fn acl_url(&self, key: &str) -> String {
        format!(
            "{}/b/{}/o/{}/acl",
            GCS_API_BASE,
            urlencoding::encode(&self.bucket),
            urlencoding::encode(key)
        )
    }

    /// Make one object readable by anyone.
    pub async fn grant(&self, key: &str) -> StorageResult<()> {
        let credential = self
            .credentials
            .get_credential()
            .await
            .map_err(|e| StorageError::BackendError(format!("Failed to obtain credential: {}", e)))?;

        let response = self
            .client
            .post(self.acl_url(key))
            .bearer_auth(&credential.bearer)
            .json(&serde_json::json!({ "entity": "allUsers", "role": "READER" }))
            .send()
            .await
            .map_err(|e| StorageError::BackendError(format!("ACL request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StorageError::BackendError(format!(
                "ACL request returned {}: {}",
                status, body
            )));
        }

        Ok(())
    }
}
