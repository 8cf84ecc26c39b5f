//! Per-invocation run options
//!
//! Everything the command line decides for one run, plus hints derived from
//! the host (CPU count, runtime manager shell snippets). Built once at
//! startup and owned by the [`RunContext`](crate::RunContext).

use bosun_fs::BosunPath;
use std::path::PathBuf;

/// Environment used when none is given on the command line.
pub const DEFAULT_ENVIRONMENT: &str = "local";

/// Static asset types subcommands are allowed to publish.
pub const FILE_TYPES_WHITELIST: &[&str] = &["js", "css", "img", "html", "swf", "fonts", "pdf", "json"];

/// Parallelism hints for subcommands. The core itself never spawns workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Concurrency {
    /// Network-bound work
    pub network: usize,
    /// CPU-bound work
    pub cpu: usize,
}

impl Concurrency {
    pub fn for_cpus(cpus: usize) -> Self {
        Self {
            network: cpus * 4,
            cpu: cpus.saturating_sub(1).max(1),
        }
    }
}

/// Shell snippets subcommands prepend to run under the managed runtime.
///
/// All empty when the system runtime is requested.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeShell {
    pub source: String,
    pub use_project: String,
    pub use_default: String,
    pub which: String,
    pub install: String,
}

impl RuntimeShell {
    pub fn managed() -> Self {
        let source = ". ${NVM_DIR:-$HOME/.nvm}/nvm.sh && ".to_string();
        Self {
            use_project: format!("{source}nvm use;"),
            use_default: format!("{source}nvm use default;"),
            which: format!("{source}nvm which"),
            install: format!("{source}nvm install"),
            source,
        }
    }

    pub fn system() -> Self {
        Self::default()
    }
}

/// Options for a single invocation.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Environment name, selects `<workspace>/.bosun/<environment>.json`
    pub environment: String,
    /// Explicit config directory; skips platform resolution and migration
    pub config_path: Option<PathBuf>,
    /// Explicit user config file
    pub config_file: Option<PathBuf>,
    /// Treat the current directory as a deployable service when it has a
    /// service descriptor
    pub service: bool,
    /// Use the system runtime instead of the managed one
    pub system_runtime: bool,
    /// Print available commands instead of help when no command matches
    pub list_commands: bool,
    /// Answer yes to the first-time config creation prompt
    pub assume_yes: bool,
    /// Version of the running binary
    pub version: String,
    /// Command name followed by its arguments
    pub args: Vec<String>,
    /// Directory the run started in
    pub cwd: PathBuf,
    /// Installation directory; global commands live under it
    pub install_dir: PathBuf,
    pub cpus: usize,
    pub concurrency: Concurrency,
    pub runtime_shell: RuntimeShell,
}

impl RunOptions {
    /// Options with defaults for everything but the start directory.
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cpus = std::thread::available_parallelism()
            .map(|n| n.get())
            .unwrap_or(1);
        Self {
            environment: DEFAULT_ENVIRONMENT.to_string(),
            config_path: None,
            config_file: None,
            service: false,
            system_runtime: false,
            list_commands: false,
            assume_yes: false,
            version: env!("CARGO_PKG_VERSION").to_string(),
            args: Vec::new(),
            cwd: cwd.into(),
            install_dir: PathBuf::new(),
            cpus,
            concurrency: Concurrency::for_cpus(cpus),
            runtime_shell: RuntimeShell::managed(),
        }
    }

    /// Switch to the system runtime, clearing the managed shell snippets.
    pub fn with_system_runtime(mut self, enabled: bool) -> Self {
        self.system_runtime = enabled;
        self.runtime_shell = if enabled {
            RuntimeShell::system()
        } else {
            RuntimeShell::managed()
        };
        self
    }

    /// Directory holding the global command scripts.
    pub fn global_commands_dir(&self) -> PathBuf {
        self.install_dir.join(BosunPath::CommandsDir)
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, 4, 1)]
    #[case(2, 8, 1)]
    #[case(8, 32, 7)]
    fn concurrency_hints(#[case] cpus: usize, #[case] network: usize, #[case] cpu: usize) {
        assert_eq!(Concurrency::for_cpus(cpus), Concurrency { network, cpu });
    }

    #[test]
    fn system_runtime_clears_shell_snippets() {
        let options = RunOptions::new("/tmp").with_system_runtime(true);
        assert_eq!(options.runtime_shell, RuntimeShell::default());

        let options = options.with_system_runtime(false);
        assert!(options.runtime_shell.use_project.ends_with("nvm use;"));
    }
}
