//! Command modules and their dispatch
//!
//! Commands come from two providers: the workspace-local one and the global
//! one that ships with the installation. The local provider takes precedence;
//! shadowing a global command is reported as a warning.
//!
//! ```text
//!     dispatch("build", args)
//!            |
//!   CommandRegistry::resolve
//!      |             |
//!   local         global
//!   <ws>/commands  builtins, <install>/commands
//! ```

mod dispatch;
mod provider;
mod script;

pub use dispatch::{DispatchOutcome, Dispatcher};
pub use provider::{BuiltinProvider, CommandProvider, CommandRegistry, ProviderChain, Resolved};
pub use script::{REQUIRES_RUNTIME_MANAGER_DIRECTIVE, ScriptCommand, ScriptDirectory};

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;

use crate::context::RunContext;
use crate::runtime::RUNTIME_MANAGER_REMEDY;

/// A prerequisite a command needs before it may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// The external runtime manager (nvm) must be installed, unless the
    /// system runtime was requested
    RuntimeManager,
}

impl Capability {
    /// What the operator has to do to satisfy the capability.
    pub fn remedy(&self) -> &'static str {
        match self {
            Self::RuntimeManager => RUNTIME_MANAGER_REMEDY,
        }
    }
}

/// Failure reported by a command.
///
/// A positive `code` is forwarded as the process exit code; anything else
/// exits with 1.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct CommandError {
    pub message: String,
    pub code: Option<i32>,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code: Some(code),
        }
    }

    pub fn exit_code(&self) -> i32 {
        match self.code {
            Some(code) if code > 0 => code,
            _ => 1,
        }
    }
}

/// An executable command module.
#[async_trait]
pub trait Command: Send + Sync {
    /// Prerequisites checked before [`run`](Self::run) is called.
    fn requirements(&self) -> &[Capability] {
        &[]
    }

    /// Run to completion. There is no cancellation.
    async fn run(&self, ctx: &mut RunContext, args: &[String]) -> Result<(), CommandError>;
}

/// Which provider a command came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOrigin {
    Local,
    Global,
}

/// Where a command's implementation lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLocation {
    /// Compiled into the binary
    Builtin,
    /// A script file on disk
    Script(PathBuf),
}

impl std::fmt::Display for CommandLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Builtin => f.write_str("<builtin>"),
            Self::Script(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A resolved command: its name, where it lives, and the module itself.
#[derive(Clone)]
pub struct CommandHandle {
    pub name: String,
    pub location: CommandLocation,
    pub command: Arc<dyn Command>,
}

impl CommandHandle {
    pub fn requirements(&self) -> &[Capability] {
        self.command.requirements()
    }
}

impl std::fmt::Debug for CommandHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandHandle")
            .field("name", &self.name)
            .field("location", &self.location)
            .field("requirements", &self.requirements())
            .finish()
    }
}

/// Command names must be a single plain path component.
pub(crate) fn is_valid_command_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with('.')
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some(3), 3)]
    #[case(Some(0), 1)]
    #[case(Some(-2), 1)]
    #[case(None, 1)]
    fn exit_code_mapping(#[case] code: Option<i32>, #[case] expected: i32) {
        let err = CommandError {
            message: "failed".into(),
            code,
        };
        assert_eq!(err.exit_code(), expected);
    }

    #[rstest]
    #[case("build", true)]
    #[case("run-tests", true)]
    #[case("", false)]
    #[case(".hidden", false)]
    #[case("../escape", false)]
    #[case("a/b", false)]
    fn command_name_validation(#[case] name: &str, #[case] valid: bool) {
        assert_eq!(is_valid_command_name(name), valid);
    }
}
