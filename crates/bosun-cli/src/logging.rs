//! Diagnostic logging setup

use tracing_subscriber::EnvFilter;

/// Install the global subscriber.
///
/// `RUST_LOG` wins; otherwise `--verbose` enables debug output for bosun
/// crates and everything else stays at warn.
pub fn init(verbose: bool) {
    let default = if verbose {
        "warn,bosun_core=debug,bosun_fs=debug,bosun_cli=debug"
    } else {
        "warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .try_init();
    if installed.is_ok() {
        tracing::debug!("Verbose mode enabled");
    }
}
