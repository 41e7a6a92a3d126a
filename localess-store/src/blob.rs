//! Blob storage for published snapshots.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tokio::sync::Mutex;

use crate::document::atomic_write;
use crate::error::{Result, StoreError};

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Fetch a blob. Missing blobs are [`StoreError::NotFound`].
    async fn download(&self, path: &str) -> Result<Bytes>;

    /// Create or overwrite a blob.
    async fn save(&self, path: &str, data: Bytes, content_type: &str) -> Result<()>;
}

fn check_blob_path(path: &str) -> Result<()> {
    let bad = path.is_empty()
        || path.starts_with('/')
        || path
            .split('/')
            .any(|p| p.is_empty() || p == "." || p == ".." || p.starts_with(".tmp_"));
    if bad {
        return Err(StoreError::InvalidPath {
            path: path.to_string(),
            reason: "blob paths are relative and may not contain empty or dot segments".into(),
        });
    }
    Ok(())
}

/// Blobs kept as plain files under a root directory.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl BlobStore for FileBlobStore {
    async fn download(&self, path: &str) -> Result<Bytes> {
        check_blob_path(path)?;
        match fs::read(self.root.join(path)).await {
            Ok(data) => Ok(Bytes::from(data)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StoreError::not_found(path)),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, path: &str, data: Bytes, content_type: &str) -> Result<()> {
        check_blob_path(path)?;
        let file = self.root.join(path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).await?;
        }
        atomic_write(&file, &data).await?;
        tracing::debug!("Saved blob {} ({}, {} bytes)", path, content_type, data.len());
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct StoredBlob {
    data: Bytes,
    content_type: String,
}

/// In-memory blob store. Downloads can be made to fail to exercise
/// backend-error handling.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, StoredBlob>>,
    failing: AtomicBool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// While set, every download fails with [`StoreError::Backend`].
    pub fn fail_downloads(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn content_type(&self, path: &str) -> Option<String> {
        self.blobs
            .lock()
            .await
            .get(path)
            .map(|b| b.content_type.clone())
    }

    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.blobs.lock().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn download(&self, path: &str) -> Result<Bytes> {
        check_blob_path(path)?;
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Backend {
                message: format!("download of {path} failed"),
            });
        }
        self.blobs
            .lock()
            .await
            .get(path)
            .map(|b| b.data.clone())
            .ok_or_else(|| StoreError::not_found(path))
    }

    async fn save(&self, path: &str, data: Bytes, content_type: &str) -> Result<()> {
        check_blob_path(path)?;
        self.blobs.lock().await.insert(
            path.to_string(),
            StoredBlob {
                data,
                content_type: content_type.to_string(),
            },
        );
        Ok(())
    }
}
