//! Per-invocation run context
//!
//! Built once by [`start`](crate::start) and passed explicitly to every
//! command. Nothing here is global.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use bosun_fs::BosunPath;

use crate::command::Capability;
use crate::config::ConfigStore;
use crate::env::EnvVars;
use crate::error_stack::ErrorEntry;
use crate::notify::Notifier;
use crate::options::RunOptions;
use crate::paths::ConfigPaths;
use crate::runtime::find_runtime_manager;
use crate::service::{ServiceRepo, repo_name};
use crate::team::{Team, Teams, resolve_org, resolve_repos, resolve_team};

/// The workspace a run operates in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    /// Root directory of the multi-repository checkout
    pub root: PathBuf,
    /// `<root>/.bosun`
    pub config_dir: PathBuf,
    /// `<root>/.bosun/<environment>.json`
    pub env_config_file: PathBuf,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>, environment: &str) -> Self {
        let root = root.into();
        let config_dir = root.join(BosunPath::Marker);
        Self {
            env_config_file: config_dir.join(format!("{environment}.json")),
            config_dir,
            root,
        }
    }

    /// Directory holding workspace-local command scripts.
    pub fn commands_dir(&self) -> PathBuf {
        self.root.join(BosunPath::CommandsDir)
    }
}

/// Everything a command needs to know about the current run.
pub struct RunContext {
    pub options: RunOptions,
    pub paths: ConfigPaths,
    pub workspace: Workspace,
    pub config: ConfigStore,
    /// Set when running inside a deployable service in service mode
    pub service: Option<ServiceRepo>,
    env: EnvVars,
    notifier: Arc<dyn Notifier>,
}

impl RunContext {
    pub fn new(
        options: RunOptions,
        paths: ConfigPaths,
        workspace: Workspace,
        config: ConfigStore,
        env: EnvVars,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let service = ServiceRepo::detect(&options.cwd, options.service);
        Self {
            options,
            paths,
            workspace,
            config,
            service,
            env,
            notifier,
        }
    }

    pub fn notifier(&self) -> &Arc<dyn Notifier> {
        &self.notifier
    }

    pub fn env(&self) -> &EnvVars {
        &self.env
    }

    pub fn log(&self, message: &str) {
        self.notifier.log(message);
    }

    pub fn warn(&self, message: &str) {
        self.notifier.warn(message);
    }

    pub fn error(&self, message: &str) {
        self.notifier.error(message);
    }

    /// Record an error with named arguments.
    pub fn record(&self, entry: ErrorEntry) {
        self.notifier.record(entry);
    }

    pub fn cwd(&self) -> &Path {
        &self.options.cwd
    }

    /// Teams as currently configured.
    ///
    /// Read from the store on every call so changes made with
    /// [`ConfigStore::set`] are seen immediately.
    pub fn teams(&self) -> Teams {
        Teams::from_config(self.config.get("teams").as_ref())
    }

    pub fn team(&self) -> Option<Team> {
        self.teams().resolve(&self.workspace.root).cloned()
    }

    pub fn team_name(&self) -> Option<String> {
        resolve_team(&self.workspace.root, &self.teams())
    }

    pub fn org(&self) -> String {
        resolve_org(&self.workspace.root, &self.teams())
    }

    /// Repositories to operate on.
    ///
    /// In service mode this is always just the current repository.
    pub fn repos(&self) -> Vec<String> {
        match &self.service {
            Some(service) => vec![service.name.clone()],
            None => resolve_repos(&self.workspace.root, &self.teams(), self.cwd()),
        }
    }

    /// Name of the repository in the current directory.
    pub fn repo_name(&self) -> String {
        repo_name(self.cwd())
    }

    /// Directory holding all of the organisation's repositories.
    pub fn org_path(&self) -> &Path {
        &self.workspace.root
    }

    /// Checkout directory of `repo`, which may be given as `org/name`.
    pub fn repo_path(&self, repo: &str) -> PathBuf {
        let is_current_service = self.service.as_ref().is_some_and(|s| s.name == repo);
        if is_current_service {
            return self.cwd().to_path_buf();
        }
        let name = repo.split('/').nth(1).unwrap_or(repo);
        self.workspace.root.join(name)
    }

    /// Clone URL for `repo`. Bare names are qualified with the current org.
    pub fn repo_url(&self, repo: &str) -> String {
        let host = self
            .config
            .get_str("github.hostname")
            .unwrap_or_else(|| "github.com".to_string());
        let host_user = self
            .config
            .get_str("github.hostUser")
            .unwrap_or_else(|| "git".to_string());
        let org = self.org();
        let qualified = if repo.contains('/') || org.is_empty() {
            repo.to_string()
        } else {
            format!("{org}/{repo}")
        };
        format!("{host_user}@{host}:{qualified}.git")
    }

    /// Whether `capability` is available. Missing capabilities are recorded
    /// as errors.
    pub fn has_capability(&self, capability: Capability) -> bool {
        match capability {
            Capability::RuntimeManager => {
                if self.options.system_runtime {
                    return true;
                }
                let found = find_runtime_manager(&self.env).is_some();
                if !found {
                    self.error("Could not find nvm");
                }
                found
            }
        }
    }

    /// Variables exported to command scripts.
    pub fn script_env(&self) -> Vec<(String, String)> {
        vec![
            (
                "BOSUN_WORKSPACE".to_string(),
                self.workspace.root.display().to_string(),
            ),
            (
                "BOSUN_ENVIRONMENT".to_string(),
                self.options.environment.clone(),
            ),
            ("BOSUN_TEAM".to_string(), self.team_name().unwrap_or_default()),
            ("BOSUN_ORG".to_string(), self.org()),
            ("BOSUN_REPOS".to_string(), self.repos().join(" ")),
        ]
    }
}

impl std::fmt::Debug for RunContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RunContext")
            .field("options", &self.options)
            .field("paths", &self.paths)
            .field("workspace", &self.workspace)
            .field("teams", &self.teams())
            .field("service", &self.service)
            .finish_non_exhaustive()
    }
}
