//! One-time migration of the legacy per-user config directory

use std::path::Path;

use crate::{Result, io};

/// What a migration attempt did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Migration {
    /// No legacy directory exists; nothing to do
    NoLegacy,
    /// The legacy directory was copied into the new location
    Copied { files: usize },
    /// Both directories exist; the legacy one is stale and was left alone
    StaleLegacy,
}

/// Copy `legacy` into `current` when the legacy directory exists and the
/// current one does not.
///
/// Idempotent: once `current` exists no copy is performed again.
pub fn migrate_legacy_dir(legacy: &Path, current: &Path) -> Result<Migration> {
    if !legacy.exists() {
        return Ok(Migration::NoLegacy);
    }

    if current.exists() {
        tracing::debug!(?legacy, ?current, "Legacy config directory still present");
        return Ok(Migration::StaleLegacy);
    }

    io::ensure_dir(current)?;
    let files = io::copy_dir_all(legacy, current)?;
    Ok(Migration::Copied { files })
}
