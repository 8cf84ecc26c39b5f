use bosun_fs::{DocumentStore, Error};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.json");
    fs::write(&file_path, r#"{"github": {"user": "octo"}}"#).unwrap();

    let doc = DocumentStore::new().load(&file_path).unwrap();

    assert_eq!(doc, json!({"github": {"user": "octo"}}));
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("local.toml");
    fs::write(&file_path, "[github]\nuser = \"octo\"\n").unwrap();

    let doc = DocumentStore::new().load(&file_path).unwrap();

    assert_eq!(doc["github"]["user"], "octo");
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("local.yml");
    fs::write(&file_path, "github:\n  user: octo\n").unwrap();

    let doc = DocumentStore::new().load(&file_path).unwrap();

    assert_eq!(doc["github"]["user"], "octo");
}

#[test]
fn test_load_optional_missing_file() {
    let temp = TempDir::new().unwrap();
    let doc = DocumentStore::new()
        .load_optional(&temp.path().join("absent.json"))
        .unwrap();
    assert!(doc.is_none());
}

#[test]
fn test_invalid_json_reports_path() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("broken.json");
    fs::write(&file_path, "{ not json").unwrap();

    let err = DocumentStore::new().load(&file_path).unwrap_err();

    assert!(matches!(err, Error::DocumentParse { .. }));
    assert!(err.to_string().contains("broken.json"));
}

#[test]
fn test_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.ini");
    fs::write(&file_path, "a=1").unwrap();

    let err = DocumentStore::new().load(&file_path).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
}

#[test]
fn test_save_then_load_json_preserves_key_order() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("config.json");
    let value = json!({"zeta": 1, "alpha": 2});

    let store = DocumentStore::new();
    store.save(&file_path, &value).unwrap();

    let content = fs::read_to_string(&file_path).unwrap();
    assert!(content.find("zeta").unwrap() < content.find("alpha").unwrap());
    assert_eq!(store.load(&file_path).unwrap(), value);
}
