//! Severity classification for Localess errors
//!
//! Each crate defines its own `thiserror` enum. Implementing [`Severity`] lets
//! callers at the edges (HTTP handlers, the CLI) pick a log level without
//! matching on foreign error variants.

use std::fmt::Display;

/// Severity levels for error classification
///
/// - **Warning**: the request cannot be served but nothing is wrong with the
///   system, e.g. a space or snapshot that does not exist.
/// - **Error**: an operation failed and the caller should know about it.
/// - **Critical**: the process cannot continue, e.g. unreadable configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

/// Trait for error types that have severity levels
///
/// ```rust
/// use localess_common::{ErrorSeverity, Severity};
///
/// #[derive(Debug)]
/// enum LookupError {
///     Missing,
///     Corrupt,
/// }
///
/// impl Severity for LookupError {
///     fn severity(&self) -> ErrorSeverity {
///         match self {
///             LookupError::Missing => ErrorSeverity::Warning,
///             LookupError::Corrupt => ErrorSeverity::Critical,
///         }
///     }
/// }
///
/// assert_eq!(LookupError::Missing.severity(), ErrorSeverity::Warning);
/// ```
pub trait Severity {
    fn severity(&self) -> ErrorSeverity;
}

/// Emit `err` through `tracing` at the level matching its severity.
pub fn log_by_severity<E: Severity + Display>(context: &str, err: &E) {
    match err.severity() {
        ErrorSeverity::Warning => tracing::warn!("{}: {}", context, err),
        ErrorSeverity::Error | ErrorSeverity::Critical => tracing::error!("{}: {}", context, err),
    }
}
