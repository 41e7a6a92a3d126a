//! Precedence across defaults, discovered files and `LOCALESS_` variables.

use localess_config::{ConfigProvider, LocalessConfig};
use serial_test::serial;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
#[serial]
fn later_discovered_formats_override_earlier_ones() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("localess.toml"), "app_name = \"FromToml\"\n[cache]\nmax_age = 1\n").unwrap();
    fs::write(tmp.path().join("localess.json"), r#"{"app_name": "FromJson"}"#).unwrap();

    let config = ConfigProvider::new().in_dir(tmp.path()).load().unwrap();
    assert_eq!(config.app_name, "FromJson");
    assert_eq!(config.cache.max_age, 1);
}

#[test]
#[serial]
fn env_sets_nested_storage_dir() {
    let tmp = TempDir::new().unwrap();
    std::env::set_var("LOCALESS_STORAGE__DATA_DIR", "/srv/localess");
    std::env::set_var("LOCALESS_SERVER__HOST", "0.0.0.0");
    let result = ConfigProvider::new().in_dir(tmp.path()).load();
    std::env::remove_var("LOCALESS_STORAGE__DATA_DIR");
    std::env::remove_var("LOCALESS_SERVER__HOST");

    let config = result.unwrap();
    assert_eq!(config.storage.data_dir, PathBuf::from("/srv/localess"));
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.server.port, LocalessConfig::default().server.port);
}
