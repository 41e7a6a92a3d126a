//! Configuration file discovery

use std::path::{Path, PathBuf};

use tracing::{debug, trace};

/// Base name of discovered configuration files.
pub const CONFIG_FILE_STEM: &str = "localess";

/// Configuration file format detected from file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "yaml" | "yml" => Some(Self::Yaml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// A configuration file with its detected format
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub format: ConfigFormat,
}

/// Finds `localess.*` files in a directory
pub struct FileDiscovery {
    dir: PathBuf,
}

impl FileDiscovery {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Every existing config file, in merge order (toml, yaml, yml, json).
    pub fn discover(&self) -> Vec<ConfigFile> {
        let mut found = Vec::new();
        for ext in ["toml", "yaml", "yml", "json"] {
            let path = self.dir.join(format!("{CONFIG_FILE_STEM}.{ext}"));
            trace!("checking for config file {}", path.display());
            if path.is_file() {
                if let Some(format) = ConfigFormat::from_extension(ext) {
                    debug!("found config file {}", path.display());
                    found.push(ConfigFile { path, format });
                }
            }
        }
        found
    }
}
