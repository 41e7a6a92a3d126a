//! Hierarchical document store.
//!
//! Paths alternate collection and document segments:
//! `spaces/{spaceId}/contents/{contentId}`. A document path has an even
//! number of segments, a collection path an odd number.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;
use tokio::sync::Mutex;
use ulid::Ulid;

use crate::error::{Result, StoreError};

/// A document read from a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: String,
    pub data: Value,
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Read one document. `Ok(None)` when it does not exist.
    async fn get(&self, path: &str) -> Result<Option<Value>>;

    /// All documents directly inside `collection`, ordered by id.
    async fn list(&self, collection: &str) -> Result<Vec<Document>>;

    /// Create or replace a document.
    async fn set(&self, path: &str, data: Value) -> Result<()>;

    /// Create a document with a generated id and return the id.
    async fn add(&self, collection: &str, data: Value) -> Result<String> {
        let id = Ulid::new().to_string();
        self.set(&format!("{collection}/{id}"), data).await?;
        Ok(id)
    }
}

fn segments(path: &str) -> Result<Vec<&str>> {
    let parts: Vec<&str> = path.split('/').collect();
    let invalid = |reason: &str| StoreError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };
    if parts.iter().any(|p| p.is_empty()) {
        return Err(invalid("empty segment"));
    }
    if parts.iter().any(|p| *p == "." || *p == ".." || p.starts_with(".tmp_")) {
        return Err(invalid("reserved segment"));
    }
    Ok(parts)
}

pub(crate) fn check_document_path(path: &str) -> Result<()> {
    if segments(path)?.len() % 2 != 0 {
        return Err(StoreError::InvalidPath {
            path: path.to_string(),
            reason: "document paths have an even number of segments".into(),
        });
    }
    Ok(())
}

pub(crate) fn check_collection_path(path: &str) -> Result<()> {
    if segments(path)?.len() % 2 != 1 {
        return Err(StoreError::InvalidPath {
            path: path.to_string(),
            reason: "collection paths have an odd number of segments".into(),
        });
    }
    Ok(())
}

/// Documents kept as YAML files under a root directory.
///
/// `spaces/s1/contents/c1` lives at `{root}/spaces/s1/contents/c1.yaml`;
/// its subcollections live in the sibling directory `{root}/spaces/s1/contents/c1/`.
#[derive(Debug, Clone)]
pub struct FileDocumentStore {
    root: PathBuf,
}

impl FileDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn document_file(&self, path: &str) -> PathBuf {
        self.root.join(format!("{path}.yaml"))
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        check_document_path(path)?;
        let file = self.document_file(path);
        let text = match fs::read_to_string(&file).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let value: Value = serde_yaml_ng::from_str(&text)?;
        Ok(Some(value))
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        check_collection_path(collection)?;
        let dir = self.root.join(collection);
        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut documents = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if id.starts_with(".tmp_") {
                continue;
            }
            let text = fs::read_to_string(&path).await?;
            match serde_yaml_ng::from_str::<Value>(&text) {
                Ok(data) => documents.push(Document {
                    id: id.to_string(),
                    data,
                }),
                Err(e) => {
                    tracing::warn!("Skipping unreadable document {}: {}", path.display(), e);
                }
            }
        }
        documents.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(documents)
    }

    async fn set(&self, path: &str, data: Value) -> Result<()> {
        check_document_path(path)?;
        let file = self.document_file(path);
        if let Some(parent) = file.parent() {
            fs::create_dir_all(parent).await?;
        }
        let yaml = serde_yaml_ng::to_string(&data)?;
        atomic_write(&file, yaml.as_bytes()).await?;
        tracing::debug!("Wrote document {}", path);
        Ok(())
    }
}

/// Write to a temp file in the same directory, then rename into place.
pub(crate) async fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    let dir = path
        .parent()
        .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidInput, "no parent dir"))?;
    let tmp = dir.join(format!(".tmp_{}", Ulid::new()));
    fs::write(&tmp, data).await?;
    fs::rename(&tmp, path).await?;
    Ok(())
}

/// In-memory document store for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<BTreeMap<String, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.documents.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.documents.lock().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn get(&self, path: &str) -> Result<Option<Value>> {
        check_document_path(path)?;
        Ok(self.documents.lock().await.get(path).cloned())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Document>> {
        check_collection_path(collection)?;
        let prefix = format!("{collection}/");
        let documents = self.documents.lock().await;
        Ok(documents
            .range(prefix.clone()..)
            .take_while(|(key, _)| key.starts_with(&prefix))
            .filter_map(|(key, data)| {
                let id = &key[prefix.len()..];
                (!id.contains('/')).then(|| Document {
                    id: id.to_string(),
                    data: data.clone(),
                })
            })
            .collect())
    }

    async fn set(&self, path: &str, data: Value) -> Result<()> {
        check_document_path(path)?;
        self.documents.lock().await.insert(path.to_string(), data);
        Ok(())
    }
}
