//! First-run setup and configuration loading

use bosun_fs::{DocumentStore, io};
use serde_json::Value;

use crate::config::{ConfigStore, Layer, LayerKind};
use crate::env::EnvVars;
use crate::notify::Notifier;
use crate::paths::ConfigPaths;
use crate::{Error, Result};

/// Config file written on first use.
pub const PACKAGED_CONFIG: &str = include_str!("../assets/default-config.json");

/// Defaults used when the config directory has no `defaults.json`.
pub const PACKAGED_DEFAULTS: &str = include_str!("../assets/defaults.json");

/// Key holding the identity every run requires.
pub const IDENTITY_KEY: &str = "github.user";

/// Key holding the access token captured at first run.
pub const TOKEN_KEY: &str = "github.authToken";

/// Interactive questions asked during setup.
pub trait Prompter {
    /// Ask a yes/no question.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Ask for a line of text.
    fn input(&self, prompt: &str) -> Result<String>;
}

/// Make sure the config directory and user config file exist.
///
/// A new config file is written in the format its extension names.
///
/// Returns `true` when the config file was just created, meaning
/// credentials still have to be captured. Declining the prompt fails with
/// [`Error::SetupDeclined`] after the directory was created but before any
/// file is written.
pub fn ensure_exists(paths: &ConfigPaths, prompter: &dyn Prompter, assume_yes: bool) -> Result<bool> {
    if !paths.dir.is_dir() {
        tracing::debug!(dir = ?paths.dir, "Creating config directory");
        io::ensure_dir(&paths.dir)?;
    }

    if paths.file.is_file() {
        return Ok(false);
    }

    let confirmed = assume_yes
        || prompter.confirm(&format!(
            "This looks like the first time you are using bosun, do you want to create a new configuration file at {}?",
            paths.file.display()
        ))?;
    if !confirmed {
        return Err(Error::SetupDeclined {
            path: paths.file.clone(),
        });
    }

    let packaged: Value = serde_json::from_str(PACKAGED_CONFIG)?;
    DocumentStore::new().save(&paths.file, &packaged)?;
    Ok(true)
}

/// Build the store from the process environment, the user config file and
/// the defaults.
pub fn load_store(paths: &ConfigPaths, env: &EnvVars) -> Result<ConfigStore> {
    let mut store = ConfigStore::new();
    store.add_layer(Layer::from_env(env));
    store.add_layer(Layer::from_file(LayerKind::File, &paths.file)?);

    let defaults = if paths.defaults_file.is_file() {
        Layer::from_file(LayerKind::Defaults, &paths.defaults_file)?
    } else {
        let packaged: Value = serde_json::from_str(PACKAGED_DEFAULTS)?;
        Layer::from_value(LayerKind::Defaults, packaged)
    };
    store.add_layer(defaults);

    Ok(store)
}

/// Ask for the identity and access token and persist them.
pub fn capture_credentials(store: &mut ConfigStore, prompter: &dyn Prompter) -> Result<()> {
    let setup_failed = |e: Error| Error::SetupFailed {
        message: e.to_string(),
    };

    let user = prompter
        .input("Enter your github user name")
        .map_err(setup_failed)?;
    let token = prompter
        .input("Enter the auth token (see: https://github.com/settings/tokens)")
        .map_err(setup_failed)?;

    store.set(IDENTITY_KEY, Value::String(user.trim().to_string()))?;
    store.set(TOKEN_KEY, Value::String(token.trim().to_string()))?;
    store.save().map_err(setup_failed)
}

/// Fail when the identity is absent from every layer.
pub fn require_credentials(store: &ConfigStore, paths: &ConfigPaths, notifier: &dyn Notifier) -> Result<()> {
    if store.get_str(IDENTITY_KEY).is_some() {
        return Ok(());
    }
    notifier.error(
        "It looks like you are in a micro service folder or something is wrong with your config?",
    );
    Err(Error::ConfigMissingCredential {
        key: IDENTITY_KEY.to_string(),
        path: paths.file.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    struct Unasked;

    impl Prompter for Unasked {
        fn confirm(&self, prompt: &str) -> Result<bool> {
            panic!("unexpected confirmation: {prompt}");
        }

        fn input(&self, prompt: &str) -> Result<String> {
            panic!("unexpected input: {prompt}");
        }
    }

    #[rstest]
    #[case("config.json")]
    #[case("config.toml")]
    #[case("config.yaml")]
    fn created_config_is_readable_in_its_format(#[case] file_name: &str) {
        let temp = TempDir::new().unwrap();
        let paths = ConfigPaths::new(temp.path(), Some(temp.path().join(file_name)));

        assert!(ensure_exists(&paths, &Unasked, true).unwrap());
        assert!(!ensure_exists(&paths, &Unasked, false).unwrap());

        let store = load_store(&paths, &EnvVars::default()).unwrap();
        let file = store.layer(LayerKind::File).unwrap().data();
        assert_eq!(file["cdn"]["port"], 7334);
        assert_eq!(file["ensureLatestVersion"], false);
        assert_eq!(file["github"]["user"], "");
    }

    #[test]
    fn packaged_documents_are_valid_json() {
        let config: Value = serde_json::from_str(PACKAGED_CONFIG).unwrap();
        let defaults: Value = serde_json::from_str(PACKAGED_DEFAULTS).unwrap();

        assert!(config["github"].is_object());
        assert_eq!(defaults["github"]["hostname"], "github.com");
    }
}
