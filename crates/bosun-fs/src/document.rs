//! Structured document loading and saving
//!
//! Configuration documents are JSON by default, but TOML and YAML files are
//! accepted as well. The format is chosen from the file extension and every
//! document is exposed as a `serde_json::Value` tree.

use serde_json::Value;
use std::path::Path;

use crate::{Error, Result, io};

/// Format-agnostic document store.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentStore;

impl DocumentStore {
    pub fn new() -> Self {
        Self
    }

    /// Load a document from a file.
    ///
    /// Format is detected from file extension:
    /// - `.json` -> JSON
    /// - `.toml` -> TOML
    /// - `.yaml`, `.yml` -> YAML
    pub fn load(&self, path: &Path) -> Result<Value> {
        let content = io::read_text(path)?;
        self.parse(path, &content)
    }

    /// Load a document if the file exists; `Ok(None)` when it does not.
    pub fn load_optional(&self, path: &Path) -> Result<Option<Value>> {
        if !path.is_file() {
            return Ok(None);
        }
        self.load(path).map(Some)
    }

    fn parse(&self, path: &Path, content: &str) -> Result<Value> {
        let extension = extension_of(path);

        match extension.as_str() {
            "json" => serde_json::from_str(content).map_err(|e| Error::DocumentParse {
                path: path.to_path_buf(),
                format: "JSON".into(),
                message: e.to_string(),
            }),
            "toml" => toml::from_str(content).map_err(|e| Error::DocumentParse {
                path: path.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            }),
            "yaml" | "yml" => serde_yaml::from_str(content).map_err(|e| Error::DocumentParse {
                path: path.to_path_buf(),
                format: "YAML".into(),
                message: e.to_string(),
            }),
            _ => Err(Error::UnsupportedFormat { extension }),
        }
    }

    /// Save a document to a file, atomically.
    pub fn save(&self, path: &Path, value: &Value) -> Result<()> {
        let extension = extension_of(path);

        let content = match extension.as_str() {
            "json" => serde_json::to_string_pretty(value).map_err(|e| Error::DocumentSerialize {
                path: path.to_path_buf(),
                format: "JSON".into(),
                message: e.to_string(),
            })?,
            "toml" => toml::to_string_pretty(value).map_err(|e| Error::DocumentSerialize {
                path: path.to_path_buf(),
                format: "TOML".into(),
                message: e.to_string(),
            })?,
            "yaml" | "yml" => serde_yaml::to_string(value).map_err(|e| Error::DocumentSerialize {
                path: path.to_path_buf(),
                format: "YAML".into(),
                message: e.to_string(),
            })?,
            _ => return Err(Error::UnsupportedFormat { extension }),
        };

        io::write_atomic(path, content.as_bytes())
    }
}

fn extension_of(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}
