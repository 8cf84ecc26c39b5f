//! Startup sequence for one invocation
//!
//! Order matters and every failure here is fatal:
//!
//! 1. resolve the config directory (migrating the legacy one)
//! 2. create the config on first use, asking first
//! 3. load the env, file and defaults layers
//! 4. capture credentials on first use, require them otherwise
//! 5. locate the workspace and add its per-environment layer
//! 6. build the run context and announce it

use std::sync::Arc;

use bosun_fs::locate_workspace;

use crate::config::{Layer, LayerKind};
use crate::context::{RunContext, Workspace};
use crate::env::EnvVars;
use crate::notify::Notifier;
use crate::options::RunOptions;
use crate::paths::{ConfigPathResolver, ConfigPaths};
use crate::setup::{self, Prompter};
use crate::Result;

/// Resolve the user configuration files for `options`.
///
/// An explicit config path skips platform resolution and migration.
pub fn resolve_config_paths(
    options: &RunOptions,
    env: &EnvVars,
    notifier: &dyn Notifier,
) -> Result<ConfigPaths> {
    let dir = match &options.config_path {
        Some(dir) => dir.clone(),
        None => ConfigPathResolver::from_env(env)?.resolve_config_dir(notifier)?,
    };
    Ok(ConfigPaths::new(dir, options.config_file.clone()))
}

/// Run the startup sequence and return the context commands run in.
pub fn start(
    options: RunOptions,
    env: EnvVars,
    notifier: Arc<dyn Notifier>,
    prompter: &dyn Prompter,
) -> Result<RunContext> {
    let paths = resolve_config_paths(&options, &env, notifier.as_ref())?;
    tracing::debug!(config = ?paths.file, "Resolved config paths");

    let created = setup::ensure_exists(&paths, prompter, options.assume_yes)?;
    let mut config = setup::load_store(&paths, &env)?;
    if created {
        setup::capture_credentials(&mut config, prompter)?;
    } else {
        setup::require_credentials(&config, &paths, notifier.as_ref())?;
    }

    let root = locate_workspace(&options.cwd);
    let workspace = Workspace::new(root, &options.environment);
    tracing::debug!(root = ?workspace.root, "Located workspace");
    config.add_layer(Layer::from_file(
        LayerKind::EnvOverride,
        &workspace.env_config_file,
    )?);

    let ctx = RunContext::new(options, paths, workspace, config, env, notifier);
    ctx.log(&banner(&ctx));
    Ok(ctx)
}

fn banner(ctx: &RunContext) -> String {
    let team = match ctx.team_name() {
        Some(team) => format!("with team {team}"),
        None => "without a team!".to_string(),
    };
    format!(
        "Initialised using {} in environment {} {team}",
        ctx.paths.file.display(),
        ctx.options.environment
    )
}
