//! Helpers shared by the bosun-core integration tests.

#![allow(dead_code)]

use bosun_core::{EnvVars, MemoryNotifier, Prompter, Result, RunContext, RunOptions, start};
use bosun_test_utils::TestWorkspace;
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Prompter with canned answers.
pub struct ScriptedPrompter {
    confirm: bool,
    answers: Mutex<VecDeque<String>>,
    pub asked: Mutex<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(confirm: bool, answers: &[&str]) -> Self {
        Self {
            confirm,
            answers: Mutex::new(answers.iter().map(|a| a.to_string()).collect()),
            asked: Mutex::new(Vec::new()),
        }
    }

    /// Prompter for runs that must not ask anything.
    pub fn silent() -> Self {
        Self::new(false, &[])
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, prompt: &str) -> Result<bool> {
        self.asked.lock().unwrap().push(prompt.to_string());
        Ok(self.confirm)
    }

    fn input(&self, prompt: &str) -> Result<String> {
        self.asked.lock().unwrap().push(prompt.to_string());
        Ok(self
            .answers
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_default())
    }
}

/// Options for a run started in `cwd` of `ws`, using its explicit config dir.
pub fn options(ws: &TestWorkspace, cwd: &Path) -> RunOptions {
    let mut options = RunOptions::new(cwd);
    options.config_path = Some(ws.config_dir());
    options.install_dir = ws.install_dir();
    options
}

/// Environment with only `HOME` pointing into the test workspace.
pub fn env(ws: &TestWorkspace) -> EnvVars {
    EnvVars::default().with("HOME", ws.home().to_string_lossy())
}

/// Start a run in the workspace root with default options.
pub fn start_in(ws: &TestWorkspace, cwd: &Path) -> (RunContext, Arc<MemoryNotifier>) {
    start_with(options(ws, cwd), env(ws))
}

pub fn start_with(options: RunOptions, env: EnvVars) -> (RunContext, Arc<MemoryNotifier>) {
    let notifier = Arc::new(MemoryNotifier::new());
    let ctx = start(options, env, notifier.clone(), &ScriptedPrompter::silent())
        .expect("startup should succeed");
    (ctx, notifier)
}
