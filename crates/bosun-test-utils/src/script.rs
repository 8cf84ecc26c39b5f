//! Command script bodies.

/// Directive line that makes a script require the runtime manager.
pub const REQUIRES_RUNTIME_MANAGER: &str = "# bosun: requires-runtime-manager";

/// A script that exits with `code`.
pub fn exit_with(code: i32) -> String {
    format!("#!/bin/sh\nexit {code}\n")
}

/// A script that appends its arguments as one line to `marker`.
pub fn record_args(marker: &std::path::Path) -> String {
    format!("#!/bin/sh\necho \"$@\" >> '{}'\n", marker.display())
}

/// A script that writes the value of each variable in `vars` as
/// `NAME=value` lines to `marker`.
pub fn dump_env(marker: &std::path::Path, vars: &[&str]) -> String {
    let mut body = String::from("#!/bin/sh\n");
    for var in vars {
        body.push_str(&format!(
            "echo \"{var}=${var}\" >> '{}'\n",
            marker.display()
        ));
    }
    body
}

/// A script needing the runtime manager that otherwise just succeeds.
pub fn needs_runtime_manager() -> String {
    format!("#!/bin/sh\n{REQUIRES_RUNTIME_MANAGER}\nexit 0\n")
}
