//! Localess configuration management using Figment
//!
//! Configuration is loaded once at process start into a [`LocalessConfig`]
//! and passed explicitly to the components that need it. There is no global
//! configuration object.
//!
//! # Precedence
//!
//! Later sources override earlier ones:
//!
//! 1. Built-in defaults
//! 2. A configuration file: an explicit path, or `localess.{toml,yaml,yml,json}`
//!    discovered in the working directory
//! 3. Environment variables prefixed `LOCALESS_`, with `__` separating nested keys
//!
//! ```bash
//! export LOCALESS_SERVER__PORT=9000        # → server.port
//! export LOCALESS_CACHE__MAX_AGE=60        # → cache.max_age
//! export LOCALESS_STORAGE__DATA_DIR=/srv   # → storage.data_dir
//! ```
//!
//! # Example TOML configuration
//!
//! ```toml
//! app_name = "Localess"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [cache]
//! max_age = 3600
//! s_maxage = 86400
//!
//! [storage]
//! data_dir = "/var/lib/localess"
//! ```

pub mod discovery;
pub mod error;
pub mod provider;
pub mod types;

pub use discovery::{ConfigFile, ConfigFormat, FileDiscovery};
pub use error::{ConfigError, ConfigResult};
pub use provider::ConfigProvider;
pub use types::{CacheConfig, LocalessConfig, ServerConfig, StorageConfig};

/// Load configuration from the working directory and the environment.
pub fn load_configuration() -> ConfigResult<LocalessConfig> {
    ConfigProvider::new().load()
}
