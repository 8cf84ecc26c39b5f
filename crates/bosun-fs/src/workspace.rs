//! Workspace root discovery
//!
//! A workspace is the root of a multi-repository checkout and is marked by a
//! `.bosun` directory. Discovery walks up from a start directory.

use std::path::{Component, Path, PathBuf};

use crate::BosunPath;

/// Find the workspace root for `start`.
///
/// Checks `start` and each of its ancestors for the marker directory and
/// returns the first directory that has one. When the filesystem root is
/// reached without a match, the (absolute) start directory is returned.
///
/// The walk only inspects the filesystem and always terminates: it visits
/// at most one directory per path component.
pub fn locate_workspace(start: &Path) -> PathBuf {
    let start = absolute(start);

    for dir in start.ancestors() {
        if dir.join(BosunPath::Marker).is_dir() {
            tracing::debug!(workspace = ?dir, "Found workspace marker");
            return dir.to_path_buf();
        }
    }

    tracing::debug!(?start, "No workspace marker found, using start directory");
    start
}

/// Make `path` absolute against the current directory and resolve `.` and
/// `..` lexically, without following symlinks.
pub fn absolute(path: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    dunce::simplified(&normalized).to_path_buf()
}
