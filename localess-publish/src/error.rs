use localess_common::{ErrorSeverity, Severity};
use localess_store::StoreError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PublishError>;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("space '{space_id}' not found")]
    SpaceNotFound { space_id: String },

    #[error("content '{content_id}' not found in space '{space_id}'")]
    ContentNotFound {
        space_id: String,
        content_id: String,
    },

    /// Folders have no data and are never published.
    #[error("content '{content_id}' is a folder")]
    NotAPage { content_id: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Severity for PublishError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            PublishError::SpaceNotFound { .. }
            | PublishError::ContentNotFound { .. }
            | PublishError::NotAPage { .. } => ErrorSeverity::Warning,
            PublishError::Store(e) => e.severity(),
            PublishError::Encode(_) => ErrorSeverity::Error,
        }
    }
}
