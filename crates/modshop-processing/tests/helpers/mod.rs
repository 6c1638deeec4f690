//! Test helpers for ingestion integration tests.
//!
//! GLB fixtures are assembled in memory: 12-byte header, a space-padded JSON chunk and an
//! optional zero-padded BIN chunk.

#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use modshop_core::{AssetCategory, StorageAddress, StorageBackend, StoredFile};
use modshop_storage::{
    GcsStorage, LocalStorage, Storage, StorageError, StorageResult, StorageRouter,
};
use object_store::memory::InMemory;
use serde_json::{json, Value};
use tempfile::TempDir;

const CHUNK_JSON: u32 = 0x4E4F_534A;
const CHUNK_BIN: u32 = 0x004E_4942;

fn pad(mut chunk: Vec<u8>, fill: u8) -> Vec<u8> {
    while chunk.len() % 4 != 0 {
        chunk.push(fill);
    }
    chunk
}

/// Frame a glTF JSON document (and optional binary buffer) as a GLB container.
pub fn build_glb(document: &Value, bin: Option<&[u8]>) -> Vec<u8> {
    let json_chunk = pad(serde_json::to_vec(document).unwrap(), b' ');
    let bin_chunk = bin.map(|b| pad(b.to_vec(), 0));

    let mut total = 12 + 8 + json_chunk.len();
    if let Some(bin_chunk) = &bin_chunk {
        total += 8 + bin_chunk.len();
    }

    let mut out = Vec::with_capacity(total);
    out.extend_from_slice(b"glTF");
    out.extend_from_slice(&2u32.to_le_bytes());
    out.extend_from_slice(&(total as u32).to_le_bytes());

    out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
    out.extend_from_slice(&CHUNK_JSON.to_le_bytes());
    out.extend_from_slice(&json_chunk);

    if let Some(bin_chunk) = bin_chunk {
        out.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(&CHUNK_BIN.to_le_bytes());
        out.extend_from_slice(&bin_chunk);
    }

    out
}

/// Two triangles spanning [-1,-1,-1]..[1,1,1], with real vertex data in the BIN chunk.
pub fn two_triangle_glb() -> Vec<u8> {
    let positions: [[f32; 3]; 6] = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, 1.0, -1.0],
        [-1.0, -1.0, 1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    let bin: Vec<u8> = positions
        .iter()
        .flat_map(|p| p.iter().flat_map(|c| c.to_le_bytes()))
        .collect();

    let document = json!({
        "asset": { "version": "2.0" },
        "buffers": [{ "byteLength": bin.len() }],
        "bufferViews": [{ "buffer": 0, "byteOffset": 0, "byteLength": bin.len() }],
        "accessors": [{
            "bufferView": 0,
            "componentType": 5126,
            "count": 6,
            "type": "VEC3",
            "min": [-1.0, -1.0, -1.0],
            "max": [1.0, 1.0, 1.0]
        }],
        "meshes": [{ "primitives": [{ "attributes": { "POSITION": 0 } }] }]
    });

    build_glb(&document, Some(&bin))
}

/// Valid container whose only mesh has no POSITION attribute.
pub fn glb_without_positions() -> Vec<u8> {
    let document = json!({
        "asset": { "version": "2.0" },
        "accessors": [{ "componentType": 5126, "count": 3, "type": "VEC3" }],
        "meshes": [{ "primitives": [{ "attributes": { "NORMAL": 0 } }] }]
    });
    build_glb(&document, None)
}

/// Container with bounds only (no BIN chunk) from the given accessor list.
pub fn glb_with_accessor_bounds(bounds: &[([f64; 3], [f64; 3])]) -> Vec<u8> {
    let accessors: Vec<Value> = bounds
        .iter()
        .map(|(min, max)| {
            json!({ "componentType": 5126, "count": 3, "type": "VEC3", "min": min, "max": max })
        })
        .collect();
    let primitives: Vec<Value> = (0..bounds.len())
        .map(|i| json!({ "attributes": { "POSITION": i } }))
        .collect();
    let document = json!({
        "asset": { "version": "2.0" },
        "accessors": accessors,
        "meshes": [{ "primitives": primitives }]
    });
    build_glb(&document, None)
}

/// Local backend rooted in a temporary directory. Keep the `TempDir` alive for the test.
pub fn local_router() -> (StorageRouter, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let local = LocalStorage::new(temp_dir.path(), "");
    let router = StorageRouter::new(StorageBackend::Local, local, None).unwrap();
    (router, temp_dir)
}

/// Cloud backend on an in-memory object store, with a local backend for legacy addresses.
pub fn cloud_router() -> (StorageRouter, TempDir) {
    let temp_dir = tempfile::tempdir().unwrap();
    let local = LocalStorage::new(temp_dir.path(), "");
    let gcs = GcsStorage::with_store(Arc::new(InMemory::new()), "car-assets", "mod-shop");
    let router = StorageRouter::new(StorageBackend::Gcs, local, Some(gcs)).unwrap();
    (router, temp_dir)
}

/// Storage that rejects writes to one category and delegates everything else.
pub struct FailingWrites {
    pub inner: StorageRouter,
    pub fail_on: AssetCategory,
}

#[async_trait]
impl Storage for FailingWrites {
    async fn store(
        &self,
        category: AssetCategory,
        filename: &str,
        content_type: &str,
        data: Bytes,
    ) -> StorageResult<StoredFile> {
        if category == self.fail_on {
            return Err(StorageError::UploadFailed("bucket refused write".to_string()));
        }
        self.inner.store(category, filename, content_type, data).await
    }

    async fn read(&self, address: &StorageAddress) -> StorageResult<Vec<u8>> {
        self.inner.read(address).await
    }

    async fn delete(&self, address: &StorageAddress) -> StorageResult<()> {
        self.inner.delete(address).await
    }

    fn backend_type(&self) -> StorageBackend {
        self.inner.backend_type()
    }
}
