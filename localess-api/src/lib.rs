//! Public read API
//!
//! Stateless HTTP handlers over published snapshots:
//!
//! - `GET /api/v1/spaces/{spaceId}/translations/{locale}.json`
//! - `GET /api/v1/spaces/{spaceId}/links?kind=&startSlug=`
//! - `GET /api/v1/spaces/{spaceId}/contents/{contentId}/{locale}`
//!
//! Unknown locales are replaced by the space's fallback locale. Responses
//! carry a public `Cache-Control` header; there is no server-side cache.

pub mod error;
pub mod handlers;
pub mod router;
pub mod state;

pub use error::{ApiError, Result};
pub use router::{router, serve};
pub use state::AppState;
