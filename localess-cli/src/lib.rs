//! Localess command-line interface.
//!
//! Commands:
//! - `localess serve`: serve the public read API
//! - `localess publish <space>`: publish translations and pages
//! - `localess schema list|show|check`: inspect schemas
//! - `localess content check`: validate page data against its schema
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error, or validation issues found

pub mod cli;
pub mod commands;
pub mod services;

pub use cli::{Cli, Commands, ContentCommands, SchemaCommands};
pub use services::Services;

/// Exit code for failures and for checks that found issues.
pub const EXIT_FAILURE: i32 = 1;
