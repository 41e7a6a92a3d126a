//! Publishing turns a space's editable documents into the immutable JSON
//! snapshots served by the public read API.
//!
//! One call writes a translations file per locale, a content file per page
//! and locale, stamps the pages as published and appends one history entry.

pub mod error;
pub mod localize;
pub mod publisher;

pub use error::{PublishError, Result};
pub use localize::localize_data;
pub use publisher::{PublishReport, Publisher, PublishedContent, JSON_CONTENT_TYPE};
