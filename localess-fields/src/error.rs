//! Error types for schema and field operations

use localess_common::{ErrorSeverity, Severity};
use thiserror::Error;

use crate::kind::FieldKind;
use crate::validation::ValidationIssue;

/// Result type for fields operations
pub type Result<T> = std::result::Result<T, FieldsError>;

/// Errors that can occur while editing or validating schemas
#[derive(Debug, Error)]
pub enum FieldsError {
    /// A field with this name is already reserved in the schema
    #[error("duplicate field name: {name}")]
    DuplicateFieldName { name: String },

    /// The pending field name is not a legal identifier
    #[error("invalid field name '{name}': {message}")]
    InvalidFieldName { name: String, message: String },

    /// Field index outside the current field sequence
    #[error("field index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Kind-specific attributes may not switch a field to another kind
    #[error("field '{name}' is {from}; cannot change kind to {to}")]
    KindChange {
        name: String,
        from: FieldKind,
        to: FieldKind,
    },

    /// Unknown field kind at a boundary (CLI, query string)
    #[error("unknown field kind: {0}")]
    UnknownKind(String),

    /// Submit was blocked by validation issues
    #[error("validation failed: {}", format_issues(.issues))]
    ValidationFailed { issues: Vec<ValidationIssue> },
}

fn format_issues(issues: &[ValidationIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Severity for FieldsError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Warning
    }
}
