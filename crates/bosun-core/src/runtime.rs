//! Detection of the external runtime manager (nvm)

use std::path::PathBuf;

use crate::env::EnvVars;

/// Script whose presence marks an installed runtime manager.
const RUNTIME_MANAGER_SCRIPT: &str = "nvm.sh";

/// Installation hint shown when a command needs the runtime manager.
pub const RUNTIME_MANAGER_REMEDY: &str =
    "You must have nvm >= 0.21.0 installed to use this command, https://github.com/nvm-sh/nvm";

/// Locate the runtime manager script via `$NVM_DIR`, then `$HOME/.nvm`.
pub fn find_runtime_manager(env: &EnvVars) -> Option<PathBuf> {
    let candidates = [
        env.get("NVM_DIR").map(PathBuf::from),
        env.get("HOME").map(|home| PathBuf::from(home).join(".nvm")),
    ];

    candidates
        .into_iter()
        .flatten()
        .map(|dir| dir.join(RUNTIME_MANAGER_SCRIPT))
        .find(|script| script.is_file())
}
