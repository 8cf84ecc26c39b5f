//! Built-in commands and the command registry for a run

pub mod config;
pub mod info;

use std::sync::Arc;

use bosun_core::{
    BuiltinProvider, CommandError, CommandRegistry, ProviderChain, RunContext, ScriptDirectory,
};

/// Commands compiled into the binary.
pub fn builtins() -> BuiltinProvider {
    BuiltinProvider::new()
        .with("config", Arc::new(config::ConfigCommand))
        .with("info", Arc::new(info::InfoCommand))
}

/// Registry for `ctx`: workspace scripts locally; builtins then installed
/// scripts globally.
pub fn registry(ctx: &RunContext) -> CommandRegistry {
    let global = ProviderChain::new()
        .with(builtins())
        .with(ScriptDirectory::new(ctx.options.global_commands_dir()));
    let local = ScriptDirectory::new(ctx.workspace.commands_dir());
    CommandRegistry::new(local, global)
}

/// Parse builtin arguments with clap. Help and version requests are printed
/// and reported as `Ok(None)`.
pub(crate) fn parse_args<T: clap::Parser>(
    name: &str,
    args: &[String],
) -> Result<Option<T>, CommandError> {
    let argv = std::iter::once(name.to_string()).chain(args.iter().cloned());
    match T::try_parse_from(argv) {
        Ok(parsed) => Ok(Some(parsed)),
        Err(e) if !e.use_stderr() => {
            print!("{e}");
            Ok(None)
        }
        Err(e) => Err(CommandError::with_code(e.render().to_string(), e.exit_code())),
    }
}
