//! # Localess Common
//!
//! Foundational pieces shared by every Localess crate:
//!
//! - [`error`] - severity classification implemented by each crate's error type
//! - [`logging`] - helpers for rendering values inside `tracing` statements

pub mod error;
pub mod logging;

pub use error::{log_by_severity, ErrorSeverity, Severity};
pub use logging::Pretty;
