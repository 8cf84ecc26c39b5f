//! Filesystem layer for bosun
//!
//! Provides the on-disk conventions (marker directory, config file names),
//! structured document loading, atomic writes, legacy config migration and
//! workspace root discovery.

pub mod constants;
pub mod document;
pub mod error;
pub mod io;
pub mod migrate;
pub mod workspace;

pub use constants::BosunPath;
pub use document::DocumentStore;
pub use error::{Error, Result};
pub use migrate::{Migration, migrate_legacy_dir};
pub use workspace::locate_workspace;
