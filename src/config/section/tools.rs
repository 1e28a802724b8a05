//! `[tools]` section and shared helpers for external tool commands.
//!
//! Every external tool is configured as a command array, the same shape
//! for all of them:
//!
//! ```toml
//! [styles]
//! compiler = ["node_modules/less/bin/lessc"]   # path-like: relative to cavy.toml
//!
//! [minify]
//! command = ["npx", "uglifyjs"]                # looked up in PATH
//!
//! [tools]
//! pty = false                                  # run tools under a pseudo-terminal
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings shared by every external tool invocation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    /// Run compilers under a pseudo-terminal so they keep colored output.
    pub pty: bool,
}

/// Package runners that fetch the real tool on first use.
const PACKAGE_RUNNERS: &[&str] = &["npx", "bunx", "pnpx", "yarn", "dlx"];

/// Resolve the program of a command array against the config root.
///
/// Only path-like programs (containing a separator) are resolved; bare
/// names are left for `PATH` lookup.
pub fn resolve_command(command: &mut [String], root: &Path) {
    if let Some(program) = command.first_mut()
        && program.contains(['/', '\\'])
        && Path::new(program.as_str()).is_relative()
    {
        *program = root.join(program.as_str()).display().to_string();
    }
}

/// Validate a tool command array.
///
/// An empty command is an error. A missing executable is only a hint: a
/// project with no sources for that tool never launches it.
pub fn validate_command(command: &[String], field: FieldPath, diag: &mut ConfigDiagnostics) {
    let Some(program) = command.first() else {
        diag.error(field, format!("{field} must not be empty"));
        return;
    };

    if which::which(program).is_ok() {
        return;
    }

    if PACKAGE_RUNNERS.contains(&program.as_str()) {
        if let Some(package) = command.get(1) {
            diag.hint(
                field,
                format!("`{package}` via `{program}`, ensure package is installed"),
            );
        }
    } else {
        diag.hint(
            field,
            format!("`{program}` not found, install it or update {field}"),
        );
    }
}
