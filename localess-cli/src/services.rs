use std::sync::Arc;

use localess_api::AppState;
use localess_config::LocalessConfig;
use localess_publish::Publisher;
use localess_store::{BlobStore, FileBlobStore, FileDocumentStore, Repository};

/// Stores and components wired from one configuration.
#[derive(Clone)]
pub struct Services {
    pub config: LocalessConfig,
    pub repo: Repository,
    pub blobs: Arc<dyn BlobStore>,
}

impl Services {
    /// File-backed stores under `storage.data_dir`.
    pub fn from_config(config: LocalessConfig) -> Self {
        let docs = FileDocumentStore::new(config.storage.documents_dir());
        let blobs = FileBlobStore::new(config.storage.blobs_dir());
        tracing::debug!(
            "Using documents at {} and blobs at {}",
            docs.root().display(),
            blobs.root().display()
        );
        Self {
            repo: Repository::new(Arc::new(docs)),
            blobs: Arc::new(blobs),
            config,
        }
    }

    pub fn publisher(&self) -> Publisher {
        Publisher::new(self.repo.clone(), self.blobs.clone())
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(self.repo.clone(), self.blobs.clone(), self.config.cache)
    }
}
