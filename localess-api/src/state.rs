use std::sync::Arc;

use bytes::Bytes;
use localess_config::CacheConfig;
use localess_store::{BlobStore, Repository, Space, StoreError};

use crate::error::{ApiError, Result};

/// Shared handler state. Cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub repo: Repository,
    pub blobs: Arc<dyn BlobStore>,
    pub cache: CacheConfig,
}

impl AppState {
    pub fn new(repo: Repository, blobs: Arc<dyn BlobStore>, cache: CacheConfig) -> Self {
        Self { repo, blobs, cache }
    }

    pub fn cache_control(&self) -> String {
        self.cache.header_value()
    }

    /// Load a space. An id that names no readable space document is
    /// [`ApiError::SpaceNotFound`].
    pub async fn space(&self, space_id: &str) -> Result<Space> {
        match self.repo.find_space(space_id).await {
            Ok(space) => Ok(space),
            Err(
                e @ (StoreError::NotFound { .. }
                | StoreError::InvalidPath { .. }
                | StoreError::InvalidDocument { .. }),
            ) => {
                if !e.is_not_found() {
                    tracing::warn!("Space {} unreadable: {}", space_id, e);
                }
                Err(ApiError::SpaceNotFound {
                    cache_control: self.cache_control(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Fetch a published blob. Every failure is reported as
    /// [`ApiError::FileNotFound`].
    pub async fn blob(&self, path: &str) -> Result<Bytes> {
        match self.blobs.download(path).await {
            Ok(data) => Ok(data),
            Err(e) => {
                if !e.is_not_found() {
                    tracing::warn!("Blob fetch of {} failed: {}", path, e);
                }
                Err(ApiError::FileNotFound)
            }
        }
    }
}

/// Locale to serve: the requested one when the space has it, else the fallback.
pub fn resolve_locale<'a>(space: &'a Space, requested: &'a str) -> &'a str {
    if space.has_locale(requested) {
        requested
    } else {
        &space.locale_fallback.id
    }
}
