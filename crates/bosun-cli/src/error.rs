//! Error types for bosun-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that abort a run before or instead of dispatch
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from bosun-core
    #[error(transparent)]
    Core(#[from] bosun_core::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
