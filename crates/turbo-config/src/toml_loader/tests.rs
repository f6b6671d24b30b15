//! Tests for TOML config loading, creation, and path resolution.

use super::*;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_turbo_config.toml"));
    assert!(matches!(
        result,
        Err(turbo_common::ConfigError::FileNotFound(_))
    ));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[session]
start_location = "https://turbo-native-demo.glitch.me"

[webview]
background = "#202020"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(
        config.session.start_location,
        "https://turbo-native-demo.glitch.me"
    );
    assert_eq!(config.webview.background, "#202020");
    // Defaults preserved
    assert_eq!(config.session.bridge_asset, "js/turbo_bridge.js");
    assert_eq!(config.screenshots.min_heap_headroom, 0.10);
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(
        result,
        Err(turbo_common::ConfigError::ParseError(_))
    ));
}

#[test]
fn load_with_invalid_values_still_returns_parsed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"loud\"\n").unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.logging.level, "loud");
}

#[test]
fn create_and_load_default_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("turbo").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.session.start_location, "http://localhost:45678");
}

#[test]
fn default_config_toml_is_valid() {
    use super::template::default_config_toml;
    use crate::schema::TurboConfig;

    let config: TurboConfig = toml::from_str(&default_config_toml()).unwrap();
    assert!(crate::validation::validate(&config).is_ok());
}

#[test]
fn default_config_path_is_reasonable() {
    if let Ok(path) = default_config_path() {
        let path_str = path.to_string_lossy();
        assert!(path_str.contains("turbo"));
        assert!(path_str.ends_with("config.toml"));
    }
}

#[test]
fn create_default_config_keeps_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

    create_default_config(&path).unwrap();
    let config = load_from_path(&path).unwrap();
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn load_from_directory_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_from_path(dir.path());
    assert!(matches!(
        result,
        Err(turbo_common::ConfigError::ParseError(_))
    ));
}
