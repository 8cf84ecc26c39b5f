//! bosun CLI
//!
//! Resolves configuration and the workspace, then dispatches to a local or
//! global command module.

mod cli;
mod commands;
mod console;
mod error;
mod logging;
mod prompt;

use std::path::PathBuf;
use std::sync::Arc;

use bosun_core::version::{DEFAULT_REGISTRY_URL, VERSION_CHECK_TIMEOUT};
use bosun_core::{
    DispatchOutcome, Dispatcher, EnvVars, Notifier, RegistryVersionSource, spawn_version_check,
};
use clap::{CommandFactory, Parser};
use colored::Colorize;

use cli::Cli;
use console::ConsoleNotifier;
use error::Result;
use prompt::DialoguerPrompter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let console = Arc::new(ConsoleNotifier::new(cli.quiet));
    let code = match run(cli, Arc::clone(&console)).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            1
        }
    };
    console.print_summary();
    std::process::exit(code);
}

async fn run(cli: Cli, console: Arc<ConsoleNotifier>) -> Result<i32> {
    let cwd = std::env::current_dir()?;
    let options = cli.into_options(cwd, default_install_dir());
    let notifier: Arc<dyn Notifier> = console;

    let mut ctx = bosun_core::start(
        options,
        EnvVars::from_process(),
        Arc::clone(&notifier),
        &DialoguerPrompter,
    )?;

    let registry_url = ctx
        .config
        .get_str("update.registryUrl")
        .unwrap_or_else(|| DEFAULT_REGISTRY_URL.to_string());
    let version_check = spawn_version_check(
        ctx.options.version.clone(),
        Arc::new(RegistryVersionSource::new(registry_url)),
        Arc::clone(&notifier),
        VERSION_CHECK_TIMEOUT,
    );
    version_check
        .enforce(ctx.config.get_bool("ensureLatestVersion"), notifier.as_ref())
        .await?;

    let dispatcher = Dispatcher::new(commands::registry(&ctx));
    let args = std::mem::take(&mut ctx.options.args);
    let outcome = dispatcher.dispatch(&mut ctx, args).await;

    match &outcome {
        DispatchOutcome::Listed { commands } => {
            println!("Available commands: {}", commands.join(" "));
        }
        DispatchOutcome::Help { requested } => {
            if let Some(name) = requested {
                eprintln!("Unknown command {}", name.cyan());
            }
            Cli::command().print_help()?;
        }
        _ => {}
    }
    Ok(outcome.exit_code())
}

/// Directory of the running binary.
fn default_install_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(PathBuf::from))
        .unwrap_or_default()
}
