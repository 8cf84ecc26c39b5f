//! Atomic writes, directory creation and recursive copies

use fs2::FileExt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;
use walkdir::WalkDir;

use crate::{Error, Result};

/// Write content atomically to a file with locking.
///
/// Writes to a temp file in the same directory, then renames it over the
/// target. An advisory lock is held on the temp file while writing.
pub fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let temp_name = format!(
        ".{}.{}.tmp",
        path.file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_default(),
        std::process::id()
    );
    let temp_path = path.with_file_name(&temp_name);

    let mut temp_file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(&temp_path)
        .map_err(|e| Error::io(&temp_path, e))?;

    temp_file.lock_exclusive().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    temp_file
        .write_all(content)
        .map_err(|e| Error::io(&temp_path, e))?;
    temp_file.sync_all().map_err(|e| Error::io(&temp_path, e))?;

    temp_file.unlock().map_err(|_| Error::LockFailed {
        path: path.to_path_buf(),
    })?;

    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))?;

    Ok(())
}

/// Read text content from a file.
pub fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| Error::io(path, e))
}

/// Create a directory and all of its parents.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| Error::io(path, e))
}

/// Recursively copy the contents of `from` into `to`, overwriting files that
/// already exist at the destination.
///
/// Returns the number of files copied. A failure part way through leaves the
/// files copied so far in place.
pub fn copy_dir_all(from: &Path, to: &Path) -> Result<usize> {
    ensure_dir(to)?;
    let mut copied = 0;

    for entry in WalkDir::new(from).min_depth(1) {
        let entry = entry.map_err(|e| Error::Copy {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            message: e.to_string(),
        })?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|e| Error::Copy {
                from: entry.path().to_path_buf(),
                to: to.to_path_buf(),
                message: e.to_string(),
            })?;
        let target = to.join(relative);

        if entry.file_type().is_dir() {
            ensure_dir(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                ensure_dir(parent)?;
            }
            fs::copy(entry.path(), &target).map_err(|e| Error::io(&target, e))?;
            copied += 1;
        }
    }

    tracing::debug!(?from, ?to, copied, "Copied directory contents");
    Ok(copied)
}
