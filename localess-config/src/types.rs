//! Typed configuration for Localess processes

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Everything a Localess process needs to know at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LocalessConfig {
    pub app_name: String,
    pub server: ServerConfig,
    pub cache: CacheConfig,
    pub storage: StorageConfig,
}

impl Default for LocalessConfig {
    fn default() -> Self {
        Self {
            app_name: "Localess".to_string(),
            server: ServerConfig::default(),
            cache: CacheConfig::default(),
            storage: StorageConfig::default(),
        }
    }
}

impl LocalessConfig {
    /// Reject values no component can work with.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::InvalidValue {
                key: "server.port".into(),
                message: "must be between 1 and 65535".into(),
            });
        }
        if self.storage.data_dir.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "storage.data_dir".into(),
                message: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> ConfigResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::InvalidValue {
                key: "server.host".into(),
                message: e.to_string(),
            })
    }
}

/// HTTP caching applied to public read responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheConfig {
    /// Seconds browsers may cache a response.
    pub max_age: u64,
    /// Seconds shared caches (CDN) may cache a response.
    pub s_maxage: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_age: 60 * 60,
            s_maxage: 60 * 60 * 24,
        }
    }
}

impl CacheConfig {
    /// Value of the `Cache-Control` header.
    pub fn header_value(&self) -> String {
        format!("public, max-age={}, s-maxage={}", self.max_age, self.s_maxage)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct StorageConfig {
    /// Root holding `documents/` and `blobs/`.
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(".localess"),
        }
    }
}

impl StorageConfig {
    pub fn documents_dir(&self) -> PathBuf {
        self.data_dir.join("documents")
    }

    pub fn blobs_dir(&self) -> PathBuf {
        self.data_dir.join("blobs")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = LocalessConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.app_name, "Localess");
        assert_eq!(config.server.socket_addr().unwrap().port(), 8080);
    }

    #[test]
    fn cache_header_value() {
        let cache = CacheConfig {
            max_age: 60,
            s_maxage: 120,
        };
        assert_eq!(cache.header_value(), "public, max-age=60, s-maxage=120");
    }

    #[test]
    fn zero_port_rejected() {
        let mut config = LocalessConfig::default();
        config.server.port = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref key, .. }) if key == "server.port"
        ));
    }

    #[test]
    fn empty_data_dir_rejected() {
        let mut config = LocalessConfig::default();
        config.storage.data_dir = PathBuf::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_host_is_invalid_value() {
        let server = ServerConfig {
            host: "not a host".into(),
            port: 80,
        };
        assert!(server.socket_addr().is_err());
    }

    #[test]
    fn storage_layout() {
        let storage = StorageConfig {
            data_dir: PathBuf::from("/srv/localess"),
        };
        assert_eq!(storage.documents_dir(), PathBuf::from("/srv/localess/documents"));
        assert_eq!(storage.blobs_dir(), PathBuf::from("/srv/localess/blobs"));
    }
}
