//! [`TestWorkspace`] builder for bosun test scenarios.
//!
//! Everything lives under one temporary directory:
//!
//! ```text
//! <root>/home                 HOME
//! <root>/config               user config directory
//! <root>/install/commands     global command scripts
//! <root>/workspace/.bosun     workspace marker + per-environment configs
//! <root>/workspace/commands   local command scripts
//! ```

use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary bosun setup with helpers for test arrangement and assertion.
///
/// # Example
///
/// ```rust,no_run
/// use bosun_test_utils::TestWorkspace;
/// use serde_json::json;
///
/// let ws = TestWorkspace::new()
///     .with_user_config(json!({"github": {"user": "octo"}}))
///     .with_local_command("build", "#!/bin/sh\nexit 0\n");
/// ws.assert_file_exists("workspace/commands/build.sh");
/// ```
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

impl TestWorkspace {
    /// Create the directory skeleton with an empty workspace marker.
    pub fn new() -> Self {
        let ws = Self {
            temp_dir: TempDir::new().unwrap(),
        };
        for dir in [
            ws.home(),
            ws.install_dir(),
            ws.workspace().join(".bosun"),
        ] {
            fs::create_dir_all(dir).unwrap();
        }
        ws
    }

    /// Root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn home(&self) -> PathBuf {
        self.root().join("home")
    }

    /// User config directory, for use as an explicit config path.
    pub fn config_dir(&self) -> PathBuf {
        self.root().join("config")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir().join("config.json")
    }

    /// Legacy config directory under the home directory.
    pub fn legacy_dir(&self) -> PathBuf {
        self.home().join(".bosun")
    }

    pub fn install_dir(&self) -> PathBuf {
        self.root().join("install")
    }

    /// Workspace root (contains the `.bosun` marker).
    pub fn workspace(&self) -> PathBuf {
        self.root().join("workspace")
    }

    /// Path of a repository inside the workspace.
    pub fn repo(&self, name: &str) -> PathBuf {
        self.workspace().join(name)
    }

    /// Write the user config file.
    pub fn with_user_config(self, config: Value) -> Self {
        write_json(&self.config_file(), &config);
        self
    }

    /// Write `defaults.json` next to the user config file.
    pub fn with_defaults(self, defaults: Value) -> Self {
        write_json(&self.config_dir().join("defaults.json"), &defaults);
        self
    }

    /// Write `<workspace>/.bosun/<environment>.json`.
    pub fn with_env_config(self, environment: &str, config: Value) -> Self {
        let path = self
            .workspace()
            .join(".bosun")
            .join(format!("{environment}.json"));
        write_json(&path, &config);
        self
    }

    /// Write a file into the legacy config directory.
    pub fn with_legacy_file(self, name: &str, content: &str) -> Self {
        write_file(&self.legacy_dir().join(name), content);
        self
    }

    /// Create an empty repository directory in the workspace.
    pub fn with_repo(self, name: &str) -> Self {
        fs::create_dir_all(self.repo(name)).unwrap();
        self
    }

    /// Create a repository with a service descriptor naming `service`.
    pub fn with_service_repo(self, dir: &str, service: &str) -> Self {
        let descriptor = serde_json::json!({"service": {"name": service}});
        write_json(&self.repo(dir).join("bosun-service.json"), &descriptor);
        self
    }

    /// Add `<workspace>/commands/<name>.sh`.
    pub fn with_local_command(self, name: &str, body: &str) -> Self {
        write_file(
            &self.workspace().join("commands").join(format!("{name}.sh")),
            body,
        );
        self
    }

    /// Add `<install>/commands/<name>.sh`.
    pub fn with_global_command(self, name: &str, body: &str) -> Self {
        write_file(
            &self.install_dir().join("commands").join(format!("{name}.sh")),
            body,
        );
        self
    }

    /// Parse a JSON file (path relative to root).
    pub fn read_json(&self, path: &str) -> Value {
        let full_path = self.root().join(path);
        let content = fs::read_to_string(&full_path)
            .unwrap_or_else(|_| panic!("Could not read file: {}", full_path.display()));
        serde_json::from_str(&content)
            .unwrap_or_else(|e| panic!("Invalid JSON in {}: {e}", full_path.display()))
    }

    /// Assert that `path` (relative to root) exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `path` (relative to root) does **not** exist.
    pub fn assert_file_not_exists(&self, path: &str) {
        let full_path = self.root().join(path);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }
}

fn write_json(path: &Path, value: &Value) {
    let content = serde_json::to_string_pretty(value).unwrap();
    write_file(path, &content);
}

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}
