//! Configuration file tests
//!
//! Round trips through JSON and TOML files on disk, and loading of
//! hand-written files with only some sections present.

use printview_core::FeatureType;
use printview_settings::{Config, SettingsError};
use std::fs;

fn customized() -> Config {
    let mut config = Config::new();
    config.parse.last = 5.0;
    config.parse.max_segments = 1000;
    config.geometry.width_mm = 0.6;
    config.geometry.hidden.insert(FeatureType::Travel);
    config
        .geometry
        .z_bias
        .insert("external".to_string(), 0.004);
    config.fetch.max_bytes = 1_000_000;
    config.grid.padding = 5.0;
    config
}

#[test]
fn test_toml_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("printview.toml");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("printview.json");

    let config = customized();
    config.save_to_file(&path).unwrap();
    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(loaded.parse_options().layer_window, Some(5));
    assert_eq!(loaded.parse_options().max_bytes, 1_000_000);
}

#[test]
fn test_load_partial_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{ "geometry": { "width_mm": 0.4 } }"#).unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.geometry.width_mm, 0.4);
    assert_eq!(config.parse, Config::default().parse);
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[fetch]\nmax_bytes = 0\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::InvalidSetting { ref key, .. } if key == "fetch.max_bytes"));
}

#[test]
fn test_load_rejects_unknown_hidden_feature() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[geometry]\nhidden = [\"walls\"]\n").unwrap();

    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::TomlError(_)));
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.toml");
    let err = Config::load_from_file(&path).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(_)));

    let err = Config::load_or_default(Some(&path)).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError(_)));
}
