//! Commands implemented as shell scripts in a commands directory

use async_trait::async_trait;
use bosun_fs::constants::COMMAND_SCRIPT_EXT;
use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command as Process;

use super::{
    Capability, Command, CommandError, CommandHandle, CommandLocation, CommandProvider,
    is_valid_command_name,
};
use crate::context::RunContext;

/// Line that marks a script as needing the runtime manager.
pub const REQUIRES_RUNTIME_MANAGER_DIRECTIVE: &str = "# bosun: requires-runtime-manager";

/// Only the head of a script is scanned for directives.
const DIRECTIVE_SCAN_LINES: usize = 10;

/// Interpreter used to run command scripts.
const SHELL: &str = "sh";

/// A directory of `<name>.sh` command scripts.
#[derive(Debug, Clone)]
pub struct ScriptDirectory {
    dir: PathBuf,
}

impl ScriptDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn script_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.{COMMAND_SCRIPT_EXT}"))
    }
}

impl CommandProvider for ScriptDirectory {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn resolve(&self, name: &str) -> Option<CommandHandle> {
        if !is_valid_command_name(name) {
            return None;
        }
        let path = self.script_path(name);
        if !path.is_file() {
            return None;
        }
        let command = ScriptCommand::load(&path);
        Some(CommandHandle {
            name: name.to_string(),
            location: CommandLocation::Script(path),
            command: Arc::new(command),
        })
    }

    fn list(&self) -> Vec<String> {
        let Ok(entries) = fs::read_dir(&self.dir) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file())
            .filter(|path| path.extension().is_some_and(|ext| ext == COMMAND_SCRIPT_EXT))
            .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
            .filter(|name| is_valid_command_name(name))
            .collect();
        names.sort();
        names
    }
}

/// A command script run under `sh`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptCommand {
    path: PathBuf,
    requirements: Vec<Capability>,
}

impl ScriptCommand {
    /// Read the script's directives. An unreadable script has none; the
    /// failure surfaces when it is run.
    pub fn load(path: &Path) -> Self {
        let requirements = match fs::File::open(path) {
            Ok(file) => scan_directives(BufReader::new(file)),
            Err(e) => {
                tracing::debug!(?path, error = %e, "Could not read command script");
                Vec::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            requirements,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn scan_directives(reader: impl BufRead) -> Vec<Capability> {
    let needs_runtime = reader
        .lines()
        .take(DIRECTIVE_SCAN_LINES)
        .map_while(|line| line.ok())
        .any(|line| line.trim() == REQUIRES_RUNTIME_MANAGER_DIRECTIVE);

    if needs_runtime {
        vec![Capability::RuntimeManager]
    } else {
        Vec::new()
    }
}

#[async_trait]
impl Command for ScriptCommand {
    fn requirements(&self) -> &[Capability] {
        &self.requirements
    }

    async fn run(&self, ctx: &mut RunContext, args: &[String]) -> Result<(), CommandError> {
        tracing::debug!(script = ?self.path, ?args, "Running command script");
        let status = Process::new(SHELL)
            .arg(&self.path)
            .args(args)
            .current_dir(&ctx.options.cwd)
            .envs(ctx.script_env())
            .status()
            .await
            .map_err(|e| {
                CommandError::new(format!("Failed to start {}: {e}", self.path.display()))
            })?;

        if status.success() {
            return Ok(());
        }
        let message = format!("{} exited with {status}", self.path.display());
        Err(match status.code() {
            Some(code) => CommandError::with_code(message, code),
            None => CommandError::new(message),
        })
    }
}
