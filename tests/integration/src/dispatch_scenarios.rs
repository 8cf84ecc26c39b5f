//! Full runs: startup followed by dispatch to builtin and script commands.

#![cfg(unix)]

use async_trait::async_trait;
use bosun_core::{
    BuiltinProvider, Command, CommandError, CommandRegistry, DispatchOutcome, Dispatcher,
    EnvVars, MemoryNotifier, Prompter, ProviderChain, RunContext, RunOptions, ScriptDirectory,
    start,
};
use bosun_test_utils::{TestWorkspace, script};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::{Arc, Mutex};

struct NoPrompts;

impl Prompter for NoPrompts {
    fn confirm(&self, _prompt: &str) -> bosun_core::Result<bool> {
        Ok(false)
    }

    fn input(&self, _prompt: &str) -> bosun_core::Result<String> {
        Ok(String::new())
    }
}

/// Builtin that remembers the repos it was asked to work on.
#[derive(Default)]
struct RecordRepos {
    seen: Mutex<Vec<String>>,
}

#[async_trait]
impl Command for RecordRepos {
    async fn run(&self, ctx: &mut RunContext, _args: &[String]) -> Result<(), CommandError> {
        self.seen.lock().unwrap().extend(ctx.repos());
        Ok(())
    }
}

fn team_workspace() -> TestWorkspace {
    let ws = TestWorkspace::new();
    let path = ws.workspace().to_string_lossy().into_owned();
    ws.with_user_config(json!({
        "github": {"user": "octo"},
        "teams": {"acme/web": {"path": path, "repos": ["site", "api"]}}
    }))
    .with_repo("site")
    .with_service_repo("api", "api-service")
}

fn run_context(ws: &TestWorkspace, cwd: std::path::PathBuf, service: bool) -> (RunContext, Arc<MemoryNotifier>) {
    let mut options = RunOptions::new(cwd);
    options.config_path = Some(ws.config_dir());
    options.install_dir = ws.install_dir();
    options.service = service;
    let env = EnvVars::default().with("HOME", ws.home().to_string_lossy());
    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = start(options, env, notifier.clone(), &NoPrompts).unwrap();
    (ctx, notifier)
}

fn dispatcher(ctx: &RunContext, builtin: Arc<RecordRepos>) -> Dispatcher {
    let global = ProviderChain::new()
        .with(BuiltinProvider::new().with("repos", builtin))
        .with(ScriptDirectory::new(ctx.options.global_commands_dir()));
    Dispatcher::new(CommandRegistry::new(
        ScriptDirectory::new(ctx.workspace.commands_dir()),
        global,
    ))
}

#[tokio::test]
async fn builtin_sees_team_repos_from_nested_dir() {
    let ws = team_workspace();
    let (mut ctx, _) = run_context(&ws, ws.repo("site"), false);
    let builtin = Arc::new(RecordRepos::default());

    let outcome = dispatcher(&ctx, builtin.clone())
        .dispatch(&mut ctx, vec!["repos".to_string()])
        .await;

    assert_eq!(outcome.exit_code(), 0);
    assert_eq!(*builtin.seen.lock().unwrap(), vec!["site", "api"]);
}

#[tokio::test]
async fn service_mode_narrows_repos_to_current_service() {
    let ws = team_workspace();
    let (mut ctx, _) = run_context(&ws, ws.repo("api"), true);
    let builtin = Arc::new(RecordRepos::default());

    dispatcher(&ctx, builtin.clone())
        .dispatch(&mut ctx, vec!["repos".to_string()])
        .await;

    assert_eq!(*builtin.seen.lock().unwrap(), vec!["api-service"]);
}

#[tokio::test]
async fn local_script_overrides_builtin_and_exports_team() {
    let ws = team_workspace();
    let marker = ws.root().join("env");
    let ws = ws.with_local_command(
        "repos",
        &script::dump_env(&marker, &["BOSUN_TEAM", "BOSUN_ORG", "BOSUN_REPOS"]),
    );
    let (mut ctx, notifier) = run_context(&ws, ws.repo("site"), false);
    let builtin = Arc::new(RecordRepos::default());

    let outcome = dispatcher(&ctx, builtin.clone())
        .dispatch(&mut ctx, vec!["repos".to_string()])
        .await;

    assert_eq!(
        outcome,
        DispatchOutcome::Completed {
            command: "repos".to_string()
        }
    );
    assert!(builtin.seen.lock().unwrap().is_empty());
    assert_eq!(
        std::fs::read_to_string(&marker).unwrap(),
        "BOSUN_TEAM=acme/web\nBOSUN_ORG=acme\nBOSUN_REPOS=site api\n"
    );
    let warnings = notifier.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("global command <builtin> overridden by local command"));
}
