use std::fs;
use std::path::PathBuf;

use minibrowser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use minibrowser::types::settings::BrowserSettings;
use serde_json::json;
use tempfile::TempDir;

fn engine_in(dir: &TempDir) -> (SettingsEngine, PathBuf) {
    let path = dir.path().join("nested").join("settings.json");
    (SettingsEngine::new(Some(path.clone())), path)
}

#[test]
fn test_load_defaults_when_no_file() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, path) = engine_in(&dir);
    let settings = engine.load().unwrap();
    assert_eq!(settings, BrowserSettings::default());
    assert!(!path.exists());
}

#[test]
fn test_default_settings_values() {
    let defaults = BrowserSettings::default();
    assert_eq!(defaults.window.title, "MiniBrowser");
    assert_eq!(defaults.window.width, 1280);
    assert_eq!(defaults.window.height, 800);
    assert_eq!(defaults.chrome.offset, 100);
    assert_eq!(defaults.chrome.default_tab_title, "New Tab");
    assert_eq!(defaults.developer.log_filter, "minibrowser=info");
}

#[test]
fn test_set_value_persists() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, path) = engine_in(&dir);
    engine.load().unwrap();
    engine.set_value("chrome.offset", json!(72)).unwrap();
    assert_eq!(engine.get_settings().chrome.offset, 72);

    let mut reloaded = SettingsEngine::new(Some(path));
    assert_eq!(reloaded.load().unwrap().chrome.offset, 72);
}

#[test]
fn test_set_value_string_field() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, _) = engine_in(&dir);
    engine
        .set_value("chrome.default_tab_title", json!("Untitled"))
        .unwrap();
    assert_eq!(engine.get_settings().chrome.default_tab_title, "Untitled");
}

#[test]
fn test_set_value_invalid_key() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, _) = engine_in(&dir);
    assert!(engine.set_value("nonexistent.key", json!(true)).is_err());
    assert!(engine.set_value("", json!(true)).is_err());
    assert!(engine.set_value("window", json!(true)).is_err());
}

#[test]
fn test_set_value_invalid_value_type() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, _) = engine_in(&dir);
    assert!(engine.set_value("window.width", json!("wide")).is_err());
    assert_eq!(engine.get_settings().window.width, 1280);
}

#[test]
fn test_reset_restores_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, _) = engine_in(&dir);
    engine.set_value("developer.devtools", json!(true)).unwrap();
    engine.set_value("window.height", json!(1024)).unwrap();
    engine.reset().unwrap();
    assert_eq!(*engine.get_settings(), BrowserSettings::default());
}

#[test]
fn test_load_malformed_json() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, path) = engine_in(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "{ invalid json }").unwrap();
    assert!(engine.load().is_err());
}

#[test]
fn test_load_partial_file_fills_missing_sections() {
    let dir = tempfile::tempdir().unwrap();
    let (mut engine, path) = engine_in(&dir);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, r#"{"chrome":{"offset":64,"default_tab_title":"Blank"}}"#).unwrap();

    let settings = engine.load().unwrap();
    assert_eq!(settings.chrome.offset, 64);
    assert_eq!(settings.window, BrowserSettings::default().window);
}
