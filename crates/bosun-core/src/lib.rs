//! Control core for bosun, a multi-repository development CLI
//!
//! This crate owns everything that happens between parsing the command line
//! and running a subcommand:
//!
//! - **Configuration**: platform config directory resolution with one-time
//!   legacy migration, and a layered key/value store
//!   (environment override > process env > user file > defaults)
//! - **Workspace and teams**: which checkout we are in and which team owns it
//! - **Dispatch**: local and global command providers, capability checks and
//!   exit code propagation
//! - **Diagnostics**: an injected [`Notifier`] sink and the [`ErrorStack`]
//!   summarised at the end of a run
//! - **Version check**: a bounded background lookup of the latest release
//!
//! # Architecture
//!
//! ```text
//!              bosun-cli
//!                  |
//!             bosun-core
//!                  |
//!              bosun-fs
//! ```

pub mod cdn;
pub mod command;
pub mod config;
pub mod context;
pub mod env;
pub mod error;
pub mod error_stack;
pub mod notify;
pub mod options;
pub mod paths;
pub mod runtime;
pub mod service;
pub mod setup;
pub mod startup;
pub mod team;
pub mod version;

pub use command::{
    BuiltinProvider, Capability, Command, CommandError, CommandHandle, CommandLocation,
    CommandOrigin, CommandProvider, CommandRegistry, DispatchOutcome, Dispatcher, ProviderChain,
    ScriptCommand, ScriptDirectory,
};
pub use config::{ConfigStore, Layer, LayerKind};
pub use context::{RunContext, Workspace};
pub use env::EnvVars;
pub use error::{Error, Result};
pub use error_stack::{ErrorEntry, ErrorStack, Severity};
pub use notify::{Level, MemoryNotifier, Notifier};
pub use options::{Concurrency, DEFAULT_ENVIRONMENT, RunOptions, RuntimeShell};
pub use paths::{ConfigPathResolver, ConfigPaths, Platform};
pub use service::ServiceRepo;
pub use setup::Prompter;
pub use startup::{resolve_config_paths, start};
pub use team::{Team, Teams};
pub use version::{
    LatestVersionSource, RegistryVersionSource, VersionCheck, VersionCheckError, VersionStatus,
    spawn_version_check,
};
