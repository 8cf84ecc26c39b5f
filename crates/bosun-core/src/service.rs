//! Service mode: operating on the single repository in the current directory

use bosun_fs::{BosunPath, DocumentStore};
use std::path::Path;

use crate::team::dir_name;

/// The repository the run is operating inside, when in service mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRepo {
    pub name: String,
}

impl ServiceRepo {
    /// Service mode applies when `--service` was given and `cwd` holds a
    /// service descriptor.
    pub fn detect(cwd: &Path, service_flag: bool) -> Option<Self> {
        if !service_flag || !cwd.join(BosunPath::ServiceDescriptor).is_file() {
            return None;
        }
        Some(Self {
            name: repo_name(cwd),
        })
    }
}

/// Name of the repository in `dir`.
///
/// The service descriptor's `service.name` wins over the package manifest's
/// `name`, which wins over the directory name. Unreadable documents are
/// skipped.
pub fn repo_name(dir: &Path) -> String {
    let store = DocumentStore::new();
    let read_name = |file: BosunPath, pointer: &str| {
        store
            .load_optional(&dir.join(file))
            .inspect_err(|e| tracing::debug!(error = %e, "Skipping unreadable {file}"))
            .ok()
            .flatten()
            .and_then(|doc| doc.pointer(pointer).and_then(|v| v.as_str()).map(String::from))
            .filter(|name| !name.is_empty())
    };

    read_name(BosunPath::ServiceDescriptor, "/service/name")
        .or_else(|| read_name(BosunPath::PackageManifest, "/name"))
        .unwrap_or_else(|| dir_name(dir))
}
