//! Storage address model: a self-describing reference to a stored file.
//!
//! Addresses are persisted as strings on asset records. Local addresses carry the
//! `local:` marker followed by `<category>/<filename>`; cloud addresses are the object key
//! verbatim. Records written before categories were encoded hold `local:<filename>`, which
//! still parses.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::asset::AssetCategory;
use crate::storage_types::StorageBackend;

/// Marker that tags an address as belonging to the local filesystem backend
pub const LOCAL_MARKER: &str = "local:";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AddressParseError {
    #[error("Storage address is empty")]
    Empty,

    #[error("Local storage address has no filename: {0}")]
    MissingFilename(String),
}

/// Where a stored file lives, with its backend as an explicit discriminator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum StorageAddress {
    Local {
        /// `None` only for legacy addresses that predate category encoding
        category: Option<AssetCategory>,
        filename: String,
    },
    Cloud {
        key: String,
    },
}

impl StorageAddress {
    pub fn local(category: AssetCategory, filename: impl Into<String>) -> Self {
        StorageAddress::Local {
            category: Some(category),
            filename: filename.into(),
        }
    }

    pub fn cloud(key: impl Into<String>) -> Self {
        StorageAddress::Cloud { key: key.into() }
    }

    /// Backend that owns the addressed object.
    pub fn backend(&self) -> StorageBackend {
        match self {
            StorageAddress::Local { .. } => StorageBackend::Local,
            StorageAddress::Cloud { .. } => StorageBackend::Gcs,
        }
    }
}

impl Display for StorageAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            StorageAddress::Local {
                category: Some(category),
                filename,
            } => write!(f, "{}{}/{}", LOCAL_MARKER, category, filename),
            StorageAddress::Local {
                category: None,
                filename,
            } => write!(f, "{}{}", LOCAL_MARKER, filename),
            StorageAddress::Cloud { key } => f.write_str(key),
        }
    }
}

impl FromStr for StorageAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AddressParseError::Empty);
        }

        let Some(rest) = s.strip_prefix(LOCAL_MARKER) else {
            return Ok(StorageAddress::cloud(s));
        };

        if rest.is_empty() {
            return Err(AddressParseError::MissingFilename(s.to_string()));
        }

        if let Some((dir, filename)) = rest.split_once('/') {
            if let Some(category) = AssetCategory::from_dir_name(dir) {
                if filename.is_empty() {
                    return Err(AddressParseError::MissingFilename(s.to_string()));
                }
                return Ok(StorageAddress::local(category, filename));
            }
        }

        Ok(StorageAddress::Local {
            category: None,
            filename: rest.to_string(),
        })
    }
}

impl From<StorageAddress> for String {
    fn from(address: StorageAddress) -> Self {
        address.to_string()
    }
}

impl TryFrom<String> for StorageAddress {
    type Error = AddressParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Result of a storage write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredFile {
    /// Externally fetchable URL for the bytes
    pub access_url: String,
    pub address: StorageAddress,
    /// Exact length of the stored buffer
    pub byte_size: u64,
}
