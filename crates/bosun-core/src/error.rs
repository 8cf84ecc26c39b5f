//! Error types for bosun-core

use std::path::PathBuf;

/// Result type for bosun-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while setting up a run or dispatching a command
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The operator declined creating a first-time configuration file
    #[error("Did not confirm creating a configuration file at {path}")]
    SetupDeclined { path: PathBuf },

    /// Interactive first-time setup could not complete
    #[error("There was an error during setup: {message}")]
    SetupFailed { message: String },

    /// A required credential is absent after all layers were loaded
    #[error(
        "Missing `{key}` in configuration {path}. You may be inside a single repository \
         without top-level credentials, or the config is incomplete."
    )]
    ConfigMissingCredential { key: String, path: PathBuf },

    /// The installed version is older than the published one and strict
    /// version checking is enabled
    #[error("bosun {current} is not up to date (latest is {latest})")]
    OutdatedVersion { current: String, latest: String },

    /// The user's home directory could not be determined
    #[error("Could not determine the home directory")]
    HomeNotFound,

    /// A configuration layer that is needed for writing is absent
    #[error("Configuration layer `{layer}` is not loaded")]
    LayerMissing { layer: String },

    /// Interactive prompt failure
    #[error("Prompt error: {0}")]
    Prompt(String),

    // Transparent wrappers for underlying errors
    /// Filesystem error from bosun-fs
    #[error(transparent)]
    Fs(#[from] bosun_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
