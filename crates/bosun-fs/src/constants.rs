//! Constants for the bosun on-disk layout.

use std::path::Path;

/// Well-known file and directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BosunPath {
    /// The `.bosun` directory marking a workspace root (also the legacy
    /// per-user config directory under `$HOME`)
    Marker,
    /// The explicit user config file inside the config directory
    ConfigFile,
    /// The packaged defaults file inside the config directory
    DefaultsFile,
    /// The `commands` directory holding command scripts
    CommandsDir,
    /// The service descriptor found at the root of a deployable service
    ServiceDescriptor,
    /// The package manifest consulted for the repository name
    PackageManifest,
}

impl BosunPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Marker => ".bosun",
            Self::ConfigFile => "config.json",
            Self::DefaultsFile => "defaults.json",
            Self::CommandsDir => "commands",
            Self::ServiceDescriptor => "bosun-service.json",
            Self::PackageManifest => "package.json",
        }
    }
}

/// Application name used for platform config directories.
pub const APP_NAME: &str = "bosun";

/// Extension of command scripts in a commands directory.
pub const COMMAND_SCRIPT_EXT: &str = "sh";

impl AsRef<Path> for BosunPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for BosunPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for BosunPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
