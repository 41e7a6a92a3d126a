//! Configuration provider using Figment

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Json, Serialized, Toml, Yaml},
    Figment,
};
use localess_common::Pretty;
use tracing::{debug, info};

use crate::discovery::{ConfigFile, ConfigFormat, FileDiscovery};
use crate::error::{ConfigError, ConfigResult};
use crate::types::LocalessConfig;

/// Prefix of environment variables read into the configuration.
pub const ENV_PREFIX: &str = "LOCALESS_";

/// Loads [`LocalessConfig`] from defaults, files and the environment.
pub struct ConfigProvider {
    search_dir: PathBuf,
    explicit_file: Option<PathBuf>,
}

impl ConfigProvider {
    /// Provider that discovers files in the current working directory.
    pub fn new() -> Self {
        Self {
            search_dir: PathBuf::from("."),
            explicit_file: None,
        }
    }

    /// Discover files in `dir` instead of the working directory.
    pub fn in_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dir = dir.into();
        self
    }

    /// Use exactly this file and skip discovery.
    pub fn with_file(mut self, path: Option<impl Into<PathBuf>>) -> Self {
        self.explicit_file = path.map(Into::into);
        self
    }

    /// Build, extract and validate the configuration.
    pub fn load(&self) -> ConfigResult<LocalessConfig> {
        let config: LocalessConfig = self.build_figment()?.extract()?;
        config.validate()?;
        info!(app = %config.app_name, "configuration loaded");
        debug!("configuration: {}", Pretty(&config));
        Ok(config)
    }

    /// Sources in precedence order; later sources override earlier ones.
    fn build_figment(&self) -> ConfigResult<Figment> {
        let mut figment = Figment::new().merge(Serialized::defaults(LocalessConfig::default()));
        for file in self.config_files()? {
            debug!("merging config file {} ({:?})", file.path.display(), file.format);
            figment = figment.merge(Self::file_provider(&file));
        }
        Ok(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
    }

    fn config_files(&self) -> ConfigResult<Vec<ConfigFile>> {
        match &self.explicit_file {
            Some(path) => Ok(vec![Self::explicit(path)?]),
            None => Ok(FileDiscovery::new(&self.search_dir).discover()),
        }
    }

    fn explicit(path: &Path) -> ConfigResult<ConfigFile> {
        if !path.is_file() {
            return Err(ConfigError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        Ok(ConfigFile {
            path: path.to_path_buf(),
            format,
        })
    }

    fn file_provider(file: &ConfigFile) -> Figment {
        match file.format {
            ConfigFormat::Toml => Figment::from(Toml::file(&file.path)),
            ConfigFormat::Yaml => Figment::from(Yaml::file(&file.path)),
            ConfigFormat::Json => Figment::from(Json::file(&file.path)),
        }
    }
}

impl Default for ConfigProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    #[serial]
    fn empty_dir_yields_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = ConfigProvider::new().in_dir(tmp.path()).load().unwrap();
        assert_eq!(config, LocalessConfig::default());
    }

    #[test]
    #[serial]
    fn toml_file_overrides_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(
            tmp.path().join("localess.toml"),
            "[cache]\nmax_age = 10\n\n[server]\nport = 9000\n",
        )
        .unwrap();
        let config = ConfigProvider::new().in_dir(tmp.path()).load().unwrap();
        assert_eq!(config.cache.max_age, 10);
        assert_eq!(config.cache.s_maxage, 86400);
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    #[serial]
    fn env_overrides_file() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("localess.yaml"), "cache:\n  s_maxage: 5\n").unwrap();
        std::env::set_var("LOCALESS_CACHE__S_MAXAGE", "7");
        let result = ConfigProvider::new().in_dir(tmp.path()).load();
        std::env::remove_var("LOCALESS_CACHE__S_MAXAGE");
        assert_eq!(result.unwrap().cache.s_maxage, 7);
    }

    #[test]
    #[serial]
    fn explicit_file_skips_discovery() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("localess.toml"), "app_name = \"Discovered\"\n").unwrap();
        let explicit = tmp.path().join("custom.json");
        fs::write(&explicit, r#"{"app_name": "Explicit"}"#).unwrap();

        let config = ConfigProvider::new()
            .in_dir(tmp.path())
            .with_file(Some(&explicit))
            .load()
            .unwrap();
        assert_eq!(config.app_name, "Explicit");
    }

    #[test]
    #[serial]
    fn missing_explicit_file_errors() {
        let result = ConfigProvider::new()
            .with_file(Some("/definitely/not/here.toml"))
            .load();
        assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
    }

    #[test]
    #[serial]
    fn unsupported_explicit_format_errors() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("localess.ini");
        fs::write(&path, "x=1").unwrap();
        let result = ConfigProvider::new().with_file(Some(&path)).load();
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat { .. })));
    }

    #[test]
    #[serial]
    fn malformed_file_is_parse_error() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("localess.toml"), "app_name = \"unterminated\n").unwrap();
        let result = ConfigProvider::new().in_dir(tmp.path()).load();
        assert!(matches!(result, Err(ConfigError::ParseError { .. })));
    }

    #[test]
    #[serial]
    fn invalid_value_fails_validation() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("localess.toml"), "[server]\nport = 0\n").unwrap();
        let result = ConfigProvider::new().in_dir(tmp.path()).load();
        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }
}
