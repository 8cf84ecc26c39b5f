//! User configuration directory resolution
//!
//! Platform defaults:
//! - Linux and other Unix: `$XDG_CONFIG_HOME/bosun`, else `~/.config/bosun`
//! - macOS and Windows: `~/.bosun`, unless all of `XDG_CONFIG_HOME`,
//!   `XDG_DATA_HOME` and `XDG_CACHE_HOME` are set, in which case the XDG
//!   location is used
//!
//! Whenever the XDG location is chosen, an existing legacy `~/.bosun`
//! directory is copied into it once.

use bosun_fs::constants::APP_NAME;
use bosun_fs::{BosunPath, Migration, migrate_legacy_dir};
use std::path::{Path, PathBuf};

use crate::env::EnvVars;
use crate::notify::Notifier;
use crate::{Error, Result};

const XDG_VARS: [&str; 3] = ["XDG_CONFIG_HOME", "XDG_DATA_HOME", "XDG_CACHE_HOME"];

/// Operating system family, as far as config locations are concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    MacOs,
    Windows,
    Unix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(target_os = "macos") {
            Self::MacOs
        } else if cfg!(windows) {
            Self::Windows
        } else {
            Self::Unix
        }
    }
}

/// Files that make up the user configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigPaths {
    /// The configuration directory
    pub dir: PathBuf,
    /// Explicit user config file
    pub file: PathBuf,
    /// Defaults file next to the user config
    pub defaults_file: PathBuf,
}

impl ConfigPaths {
    /// Paths for `dir`, with `file` overriding the default config file.
    pub fn new(dir: impl Into<PathBuf>, file: Option<PathBuf>) -> Self {
        let dir = dir.into();
        Self {
            file: file.unwrap_or_else(|| dir.join(BosunPath::ConfigFile)),
            defaults_file: dir.join(BosunPath::DefaultsFile),
            dir,
        }
    }
}

/// Computes the configuration directory and migrates the legacy one.
#[derive(Debug, Clone)]
pub struct ConfigPathResolver {
    home: PathBuf,
    platform: Platform,
    env: EnvVars,
}

impl ConfigPathResolver {
    pub fn new(home: impl Into<PathBuf>, platform: Platform, env: EnvVars) -> Self {
        Self {
            home: home.into(),
            platform,
            env,
        }
    }

    /// Resolver for the running platform. `HOME` from the snapshot wins over
    /// the platform home lookup.
    pub fn from_env(env: &EnvVars) -> Result<Self> {
        let home = env
            .get("HOME")
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(Error::HomeNotFound)?;
        Ok(Self::new(home, Platform::current(), env.clone()))
    }

    /// The pre-XDG configuration directory.
    pub fn legacy_dir(&self) -> PathBuf {
        self.home.join(BosunPath::Marker)
    }

    fn uses_xdg(&self) -> bool {
        match self.platform {
            Platform::Unix => true,
            Platform::MacOs | Platform::Windows => {
                XDG_VARS.iter().all(|var| self.env.get(var).is_some())
            }
        }
    }

    fn xdg_dir(&self) -> PathBuf {
        self.env
            .get("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|| self.home.join(".config"))
            .join(APP_NAME)
    }

    /// Resolve the configuration directory, migrating the legacy directory
    /// into it when needed.
    ///
    /// Migration is reported through `notifier` only. Copy failures are
    /// fatal; files copied before the failure are left in place.
    pub fn resolve_config_dir(&self, notifier: &dyn Notifier) -> Result<PathBuf> {
        let legacy = self.legacy_dir();
        if !self.uses_xdg() {
            tracing::debug!(?legacy, "Using legacy config directory");
            return Ok(legacy);
        }

        let current = self.xdg_dir();
        migrate(&legacy, &current, notifier)?;
        Ok(current)
    }
}

fn migrate(legacy: &Path, current: &Path, notifier: &dyn Notifier) -> Result<()> {
    let stale_warning = format!(
        "You still have an old config directory at {} that you should remove.",
        legacy.display()
    );

    match migrate_legacy_dir(legacy, current)? {
        Migration::NoLegacy => {}
        Migration::StaleLegacy => notifier.warn(&stale_warning),
        Migration::Copied { files } => {
            tracing::debug!(files, ?current, "Migrated legacy config");
            notifier.warn(&format!(
                "Your configuration has been copied to {}",
                current.display()
            ));
            notifier.warn(&stale_warning);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::MemoryNotifier;
    use tempfile::TempDir;

    #[test]
    fn unix_defaults_to_dot_config() {
        let resolver = ConfigPathResolver::new("/home/me", Platform::Unix, EnvVars::default());
        assert_eq!(resolver.xdg_dir(), PathBuf::from("/home/me/.config/bosun"));
    }

    #[test]
    fn macos_without_all_xdg_vars_uses_legacy_dir() {
        let temp = TempDir::new().unwrap();
        let env = EnvVars::default().with("XDG_CONFIG_HOME", "/xdg/config");
        let resolver = ConfigPathResolver::new(temp.path(), Platform::MacOs, env);
        let notifier = MemoryNotifier::new();

        let dir = resolver.resolve_config_dir(&notifier).unwrap();

        assert_eq!(dir, temp.path().join(".bosun"));
        assert!(notifier.warnings().is_empty());
    }

    #[test]
    fn windows_with_all_xdg_vars_uses_xdg_config_home() {
        let temp = TempDir::new().unwrap();
        let xdg = temp.path().join("xdg");
        let env = EnvVars::default()
            .with("XDG_CONFIG_HOME", xdg.to_string_lossy())
            .with("XDG_DATA_HOME", "/xdg/data")
            .with("XDG_CACHE_HOME", "/xdg/cache");
        let resolver = ConfigPathResolver::new(temp.path(), Platform::Windows, env);

        let dir = resolver.resolve_config_dir(&MemoryNotifier::new()).unwrap();

        assert_eq!(dir, xdg.join("bosun"));
    }

    #[test]
    fn config_paths_honour_explicit_file() {
        let paths = ConfigPaths::new("/cfg", Some(PathBuf::from("/elsewhere/me.json")));
        assert_eq!(paths.file, PathBuf::from("/elsewhere/me.json"));
        assert_eq!(paths.defaults_file, PathBuf::from("/cfg/defaults.json"));
    }
}
