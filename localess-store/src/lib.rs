//! Storage for Localess
//!
//! Two backing services are modeled as traits:
//!
//! - [`DocumentStore`]: slash-separated document paths
//!   (`spaces/{spaceId}/contents/{contentId}`) holding JSON values
//! - [`BlobStore`]: immutable snapshot files served by the public read API
//!
//! Each has a file-backed implementation for real deployments and an
//! in-memory one for tests. [`Repository`] layers the typed domain models
//! and the [`SchemaStore`] contract on top of a document store.

pub mod blob;
pub mod document;
pub mod error;
pub mod model;
pub mod query;
pub mod repository;

pub use blob::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use document::{Document, DocumentStore, FileDocumentStore, MemoryDocumentStore};
pub use error::{Result, StoreError};
pub use model::{
    Content, ContentKind, ContentLink, Locale, Space, Translation, TranslationHistory,
    TranslationHistoryType, TranslationKind,
};
pub use query::ContentQuery;
pub use repository::{paths, Repository, SchemaStore};
