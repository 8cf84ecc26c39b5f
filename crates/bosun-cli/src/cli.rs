//! CLI argument parsing using clap derive

use std::path::PathBuf;

use bosun_core::{DEFAULT_ENVIRONMENT, RunOptions};
use clap::Parser;

/// bosun - run commands across a team's repositories
#[derive(Parser, Debug)]
#[command(name = "bosun")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Environment to use; selects `.bosun/<environment>.json` in the workspace
    #[arg(short, long, env = "BOSUN_ENVIRONMENT", default_value = DEFAULT_ENVIRONMENT)]
    pub environment: String,

    /// Configuration directory to use instead of the platform default
    #[arg(short = 'p', long)]
    pub config_path: Option<PathBuf>,

    /// Configuration file to use instead of `<config path>/config.json`
    #[arg(short = 'c', long)]
    pub config_file: Option<PathBuf>,

    /// Operate only on the service repository in the current directory
    #[arg(short, long)]
    pub service: bool,

    /// Suppress output; errors are still summarised at exit
    #[arg(short, long)]
    pub quiet: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Use the system runtime instead of the one managed by nvm
    #[arg(long, alias = "system-node")]
    pub system_runtime: bool,

    /// List available commands when none matches
    #[arg(long, alias = "shell-commands")]
    pub list_commands: bool,

    /// Create a missing configuration file without asking
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Installation directory holding global commands
    #[arg(long, env = "BOSUN_INSTALL_DIR", hide = true)]
    pub install_dir: Option<PathBuf>,

    /// Command to run, followed by its arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Cli {
    /// Run options for an invocation started in `cwd`.
    pub fn into_options(self, cwd: PathBuf, default_install_dir: PathBuf) -> RunOptions {
        let mut options = RunOptions::new(cwd)
            .with_system_runtime(self.system_runtime)
            .with_args(self.command);
        options.environment = self.environment;
        options.config_path = self.config_path;
        options.config_file = self.config_file;
        options.service = self.service;
        options.list_commands = self.list_commands;
        options.assume_yes = self.yes;
        options.install_dir = self.install_dir.unwrap_or(default_install_dir);
        options
    }
}
