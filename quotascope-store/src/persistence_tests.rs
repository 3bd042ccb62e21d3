//! Persistence round-trip and edge case tests.

use std::path::PathBuf;
use tempfile::TempDir;

use crate::persistence::{ensure_dir, load_json, save_json};
use crate::settings_store::{RefreshCadence, Settings};

// ============================================================================
// JSON Persistence Tests
// ============================================================================

#[tokio::test]
async fn test_save_and_load_json_roundtrip() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("test.json");

    let mut settings = Settings::default();
    settings.default_project = Some("acme-prod".to_string());
    settings.refresh_cadence = RefreshCadence::FiveMinutes;
    settings.approaching_threshold = 0.9;

    save_json(&file_path, &settings).await.unwrap();
    let loaded: Settings = load_json(&file_path).await.unwrap();

    assert_eq!(loaded.default_project.as_deref(), Some("acme-prod"));
    assert_eq!(loaded.refresh_cadence, RefreshCadence::FiveMinutes);
    assert!((loaded.approaching_threshold - 0.9).abs() < f64::EPSILON);
}

#[tokio::test]
async fn test_save_creates_parent_directories() {
    let temp_dir = TempDir::new().unwrap();
    let nested_path = temp_dir
        .path()
        .join("deeply")
        .join("nested")
        .join("settings.json");

    let data = serde_json::json!({"key": "value"});

    let result = save_json(&nested_path, &data).await;
    assert!(result.is_ok());
    assert!(nested_path.exists());
}

#[tokio::test]
async fn test_load_nonexistent_file() {
    let file_path = PathBuf::from("/nonexistent/path/settings.json");

    let result: Result<Settings, _> = load_json(&file_path).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_ensure_dir_idempotent() {
    let temp_dir = TempDir::new().unwrap();
    let dir_path = temp_dir.path().join("test_dir");

    ensure_dir(&dir_path).await.unwrap();
    ensure_dir(&dir_path).await.unwrap();

    assert!(dir_path.exists());
    assert!(dir_path.is_dir());
}

// ============================================================================
// Settings Store Tests
// ============================================================================

#[tokio::test]
async fn test_settings_store_save_then_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("settings.json");

    let store = crate::SettingsStore::new(path.clone());
    store
        .update(|s| s.default_project = Some("acme-prod".to_string()))
        .await;
    store.save().await.unwrap();

    let reloaded = crate::SettingsStore::load(path).await.unwrap();
    let settings = reloaded.get().await;
    assert_eq!(settings.default_project.as_deref(), Some("acme-prod"));
}

#[tokio::test]
async fn test_settings_store_missing_file_yields_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("absent.json");

    let store = crate::SettingsStore::load(path).await.unwrap();
    let settings = store.get().await;
    assert!(settings.default_project.is_none());
    assert!((settings.effective_threshold() - 0.8).abs() < f64::EPSILON);
}
