//! Startup across crates: platform config resolution, legacy migration,
//! workspace discovery and the strict version gate.

use async_trait::async_trait;
use bosun_core::version::VersionCheckError;
use bosun_core::{
    EnvVars, Error, LatestVersionSource, MemoryNotifier, Prompter, RunOptions, spawn_version_check,
    start,
};
use bosun_test_utils::TestWorkspace;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

struct NoPrompts;

impl Prompter for NoPrompts {
    fn confirm(&self, prompt: &str) -> bosun_core::Result<bool> {
        panic!("unexpected confirmation: {prompt}");
    }

    fn input(&self, prompt: &str) -> bosun_core::Result<String> {
        panic!("unexpected input: {prompt}");
    }
}

fn xdg_env(ws: &TestWorkspace) -> EnvVars {
    let xdg = ws.root().join("xdg");
    EnvVars::default()
        .with("HOME", ws.home().to_string_lossy())
        .with("XDG_CONFIG_HOME", xdg.join("config").to_string_lossy())
        .with("XDG_DATA_HOME", xdg.join("data").to_string_lossy())
        .with("XDG_CACHE_HOME", xdg.join("cache").to_string_lossy())
}

#[test]
fn legacy_config_is_migrated_once_and_used() {
    let ws = TestWorkspace::new()
        .with_legacy_file("config.json", r#"{"github": {"user": "legacy-user"}}"#)
        .with_repo("site");
    let deep = ws.repo("site").join("src").join("lib");
    std::fs::create_dir_all(&deep).unwrap();

    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = start(RunOptions::new(&deep), xdg_env(&ws), notifier.clone(), &NoPrompts).unwrap();

    assert_eq!(ctx.paths.dir, ws.root().join("xdg").join("config").join("bosun"));
    assert_eq!(ctx.config.get_str("github.user").as_deref(), Some("legacy-user"));
    assert_eq!(ctx.workspace.root, ws.workspace());
    assert_eq!(notifier.warnings().len(), 2);

    let notifier = Arc::new(MemoryNotifier::new());
    start(RunOptions::new(&deep), xdg_env(&ws), notifier.clone(), &NoPrompts).unwrap();
    let warnings = notifier.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("old config directory"));
}

#[test]
fn explicit_config_file_beats_config_dir() {
    let ws = TestWorkspace::new().with_user_config(json!({"github": {"user": "dir-user"}}));
    let other = ws.root().join("other.yaml");
    std::fs::write(&other, "github:\n  user: yaml-user\n").unwrap();

    let mut options = RunOptions::new(ws.workspace());
    options.config_path = Some(ws.config_dir());
    options.config_file = Some(other.clone());
    let ctx = start(options, EnvVars::default(), Arc::new(MemoryNotifier::new()), &NoPrompts).unwrap();

    assert_eq!(ctx.paths.file, other);
    assert_eq!(ctx.config.get_str("github.user").as_deref(), Some("yaml-user"));
}

struct Published(&'static str);

#[async_trait]
impl LatestVersionSource for Published {
    async fn latest_version(&self) -> Result<String, VersionCheckError> {
        Ok(self.0.to_string())
    }
}

#[tokio::test]
async fn strict_version_gate_stops_outdated_binary() {
    let notifier = Arc::new(MemoryNotifier::new());

    let check = spawn_version_check(
        "1.0.0",
        Arc::new(Published("1.2.0")),
        notifier.clone(),
        Duration::from_secs(5),
    );
    let err = check.enforce(true, notifier.as_ref()).await.unwrap_err();

    assert!(matches!(err, Error::OutdatedVersion { .. }));
    let errors = notifier.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("Local: 1.0.0 < Remote: 1.2.0"));
    assert!(errors[1].contains("not up to date - exiting"));
}

#[tokio::test]
async fn lenient_version_gate_does_not_wait() {
    let notifier = Arc::new(MemoryNotifier::new());

    let check = spawn_version_check(
        "2.0.0",
        Arc::new(Published("1.2.0")),
        notifier.clone(),
        Duration::from_secs(5),
    );

    assert!(check.enforce(false, notifier.as_ref()).await.is_ok());
}
