//! Team and organisation resolution
//!
//! Teams are configured under `teams`, keyed by `<org>/<team>`:
//!
//! ```json
//! { "teams": { "acme/web": { "path": "/src/acme/web", "repos": ["site", "api"] } } }
//! ```
//!
//! A team owns the workspace when the workspace path contains the team's
//! `path` as a substring. Teams are tried in declaration order and the first
//! match wins.

use serde::Deserialize;
use serde_json::Value;
use std::path::Path;

/// A configured team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Team {
    /// `<org>/<team>` as written in the config
    pub name: String,
    /// Substring identifying the team's workspaces
    pub path: String,
    pub repos: Vec<String>,
}

impl Team {
    /// Organisation the team belongs to: everything before the first `/`.
    pub fn org(&self) -> &str {
        org_of(&self.name)
    }
}

/// Organisation part of a team name.
pub fn org_of(team_name: &str) -> &str {
    team_name.split('/').next().unwrap_or_default()
}

#[derive(Debug, Deserialize)]
struct TeamEntry {
    #[serde(default)]
    path: Option<String>,
    #[serde(default)]
    repos: Vec<Value>,
}

/// All configured teams, in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Teams {
    teams: Vec<Team>,
}

impl Teams {
    pub fn new(teams: Vec<Team>) -> Self {
        Self { teams }
    }

    /// Read teams from the `teams` config value.
    ///
    /// Entries without a non-empty `path` can never match and are dropped,
    /// as are entries that are not objects. Non-string repos are ignored.
    pub fn from_config(value: Option<&Value>) -> Self {
        let Some(Value::Object(map)) = value else {
            return Self::default();
        };

        let teams = map
            .iter()
            .filter_map(|(name, entry)| {
                let entry: TeamEntry = match serde_json::from_value(entry.clone()) {
                    Ok(entry) => entry,
                    Err(e) => {
                        tracing::debug!(team = %name, error = %e, "Ignoring malformed team entry");
                        return None;
                    }
                };
                let path = entry.path.filter(|p| !p.is_empty())?;
                Some(Team {
                    name: name.clone(),
                    path,
                    repos: entry
                        .repos
                        .into_iter()
                        .filter_map(|r| r.as_str().map(String::from))
                        .collect(),
                })
            })
            .collect();

        Self { teams }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Team> {
        self.teams.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// First team whose path occurs in `workspace`.
    pub fn resolve(&self, workspace: &Path) -> Option<&Team> {
        let workspace = workspace.to_string_lossy();
        self.teams
            .iter()
            .find(|team| workspace.contains(team.path.as_str()))
    }
}

/// Name of the team owning `workspace`.
pub fn resolve_team(workspace: &Path, teams: &Teams) -> Option<String> {
    teams.resolve(workspace).map(|t| t.name.clone())
}

/// Organisation owning `workspace`, or an empty string.
pub fn resolve_org(workspace: &Path, teams: &Teams) -> String {
    teams
        .resolve(workspace)
        .map(|t| t.org().to_string())
        .unwrap_or_default()
}

/// Repositories to operate on.
///
/// The owning team's repos, or just the current directory's name when no
/// team matches.
pub fn resolve_repos(workspace: &Path, teams: &Teams, cwd: &Path) -> Vec<String> {
    match teams.resolve(workspace) {
        Some(team) => team.repos.clone(),
        None => vec![dir_name(cwd)],
    }
}

/// Final path component of `dir`, empty for a filesystem root.
pub fn dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn teams() -> Teams {
        Teams::from_config(Some(&json!({
            "org/a": {"path": "/x", "repos": ["one", "two"]},
            "org/b": {"path": "/y", "repos": ["three"]},
        })))
    }

    #[test]
    fn resolves_team_and_org_by_path_prefix() {
        let workspace = Path::new("/x/proj");

        assert_eq!(resolve_team(workspace, &teams()).as_deref(), Some("org/a"));
        assert_eq!(resolve_org(workspace, &teams()), "org");
        assert_eq!(
            resolve_repos(workspace, &teams(), Path::new("/x/proj/one")),
            vec!["one", "two"]
        );
    }

    #[test]
    fn unmatched_workspace_falls_back_to_current_dir() {
        let workspace = Path::new("/elsewhere/proj");

        assert_eq!(resolve_team(workspace, &teams()), None);
        assert_eq!(resolve_org(workspace, &teams()), "");
        assert_eq!(
            resolve_repos(workspace, &teams(), Path::new("/elsewhere/proj/service")),
            vec!["service"]
        );
    }

    #[test]
    fn first_declared_match_wins() {
        let teams = Teams::from_config(Some(&json!({
            "zed/late": {"path": "/src"},
            "acme/early": {"path": "/src/acme"},
        })));

        assert_eq!(
            resolve_team(Path::new("/src/acme/web"), &teams).as_deref(),
            Some("zed/late")
        );
    }

    #[test]
    fn entries_without_path_never_match() {
        let teams = Teams::from_config(Some(&json!({
            "org/nopath": {"repos": ["a"]},
            "org/empty": {"path": ""},
            "org/bad": "not an object",
        })));

        assert!(teams.is_empty());
    }

    #[test]
    fn team_without_slash_is_its_own_org() {
        assert_eq!(org_of("solo"), "solo");
        assert_eq!(org_of("acme/web/extra"), "acme");
    }
}
