//! Error types for the storage layer

use localess_common::{ErrorSeverity, Severity};
use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// Document or blob does not exist
    #[error("not found: {path}")]
    NotFound { path: String },

    /// Document already exists and may not be created again
    #[error("already exists: {path}")]
    AlreadyExists { path: String },

    /// Malformed document or blob path
    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    /// Stored data does not match the expected model
    #[error("invalid document at {path}: {message}")]
    InvalidDocument { path: String, message: String },

    /// A model invariant would be broken by a write
    #[error("invariant violated: {message}")]
    Invariant { message: String },

    /// Backend failed for a reason other than absence
    #[error("storage backend error: {message}")]
    Backend { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn not_found(path: impl Into<String>) -> Self {
        StoreError::NotFound { path: path.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}

impl Severity for StoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            StoreError::NotFound { .. }
            | StoreError::AlreadyExists { .. }
            | StoreError::InvalidPath { .. }
            | StoreError::Invariant { .. } => ErrorSeverity::Warning,
            StoreError::InvalidDocument { .. }
            | StoreError::Backend { .. }
            | StoreError::Io(_)
            | StoreError::Yaml(_)
            | StoreError::Json(_) => ErrorSeverity::Error,
        }
    }
}
