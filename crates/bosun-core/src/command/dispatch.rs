//! Mapping a command line onto a command module and an exit code

use super::{Capability, CommandError, CommandRegistry};
use crate::context::RunContext;

/// What happened to a dispatched command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The command ran and succeeded
    Completed { command: String },
    /// The command ran and reported a failure
    Failed { command: String, error: CommandError },
    /// A prerequisite was missing; the command was not run
    CapabilityUnmet { command: String, capability: Capability },
    /// No command matched and listing was requested
    Listed { commands: Vec<String> },
    /// No command matched; top-level help should be shown
    Help { requested: Option<String> },
}

impl DispatchOutcome {
    /// Process exit code for this outcome.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Completed { .. } | Self::Listed { .. } | Self::Help { .. } => 0,
            Self::Failed { error, .. } => error.exit_code(),
            Self::CapabilityUnmet { .. } => 1,
        }
    }
}

/// Resolves and invokes commands.
pub struct Dispatcher {
    registry: CommandRegistry,
}

impl Dispatcher {
    pub fn new(registry: CommandRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// Run the command named by the first element of `args` with the rest
    /// as its arguments.
    pub async fn dispatch(&self, ctx: &mut RunContext, mut args: Vec<String>) -> DispatchOutcome {
        let name = if args.is_empty() {
            None
        } else {
            Some(args.remove(0))
        };

        let Some(resolved) = name.as_deref().and_then(|n| self.registry.resolve(n)) else {
            if ctx.options.list_commands {
                return DispatchOutcome::Listed {
                    commands: self.registry.list(),
                };
            }
            return DispatchOutcome::Help { requested: name };
        };

        if let Some(shadowed) = &resolved.shadowed {
            ctx.warn(&format!(
                "global command {} overridden by local command {}",
                shadowed.location, resolved.handle.location
            ));
        }

        let handle = resolved.handle;
        let unmet = handle
            .requirements()
            .iter()
            .copied()
            .find(|capability| !ctx.has_capability(*capability));
        if let Some(capability) = unmet {
            ctx.error(capability.remedy());
            return DispatchOutcome::CapabilityUnmet {
                command: handle.name,
                capability,
            };
        }

        tracing::debug!(command = %handle.name, location = %handle.location, "Invoking command");
        match handle.command.run(ctx, &args).await {
            Ok(()) => DispatchOutcome::Completed {
                command: handle.name,
            },
            Err(error) => {
                ctx.error(&format!("{} failed: {}", handle.name, error.message));
                DispatchOutcome::Failed {
                    command: handle.name,
                    error,
                }
            }
        }
    }
}
