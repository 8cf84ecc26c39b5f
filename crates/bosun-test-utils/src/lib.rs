//! Shared test utilities for the bosun workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`workspace`]: [`TestWorkspace`](workspace::TestWorkspace) builder for a
//!   home directory, a user config directory and a multi-repo workspace
//! - [`script`]: bodies for command scripts used in dispatch tests

pub mod script;
pub mod workspace;

pub use workspace::TestWorkspace;
