//! `[serve]` section configuration.
//!
//! Contains the local development server settings. `cavy serve` builds all
//! assets first, then runs:
//!
//! ```text
//! <python> <sdk>/dev_appserver.py <args...> <project-root>
//! ```
//!
//! # Example
//!
//! ```toml
//! [serve]
//! python = "python2"              # interpreter used to run the SDK
//! sdk = "~/google_appengine"      # SDK directory containing dev_appserver.py
//! args = ["--port=8080"]          # default arguments, CLI arguments are appended
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Script inside the SDK directory that starts the server.
pub const DEV_SERVER_SCRIPT: &str = "dev_appserver.py";

/// Development server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Python interpreter.
    pub python: String,

    /// SDK directory.
    pub sdk: PathBuf,

    /// Default arguments for the dev server.
    pub args: Vec<String>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            python: "python".into(),
            sdk: "~/google_appengine".into(),
            args: Vec::new(),
        }
    }
}

impl ServeConfig {
    pub const PYTHON: FieldPath = FieldPath::new("serve.python");
    pub const SDK: FieldPath = FieldPath::new("serve.sdk");

    /// Full path of the dev server script.
    pub fn script(&self) -> PathBuf {
        self.sdk.join(DEV_SERVER_SCRIPT)
    }

    /// Validate server settings. Only needed for `cavy serve`.
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.python.is_empty() {
            diag.error(Self::PYTHON, format!("{} must not be empty", Self::PYTHON));
        } else if which::which(&self.python).is_err() {
            diag.error_with_hint(
                Self::PYTHON,
                format!("`{}` not found", self.python),
                format!("install python or update {}", Self::PYTHON),
            );
        }

        let script = self.script();
        if !script.is_file() {
            diag.error_with_hint(
                Self::SDK,
                format!("{DEV_SERVER_SCRIPT} not found: {}", script.display()),
                format!("point {} at the SDK directory", Self::SDK),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use tempfile::TempDir;

    #[test]
    fn test_serve_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.serve.python, "python");
        assert!(config.serve.args.is_empty());
    }

    #[test]
    fn test_serve_config() {
        let config = test_parse_config(
            "[serve]\npython = \"python2\"\nsdk = \"/opt/gae\"\nargs = [\"--port=8081\"]",
        );
        assert_eq!(config.serve.python, "python2");
        assert_eq!(config.serve.script(), PathBuf::from("/opt/gae/dev_appserver.py"));
        assert_eq!(config.serve.args, ["--port=8081"]);
    }

    #[test]
    fn test_serve_validate_missing_sdk() {
        let dir = TempDir::new().unwrap();
        let serve = ServeConfig {
            python: "sh".into(),
            sdk: dir.path().to_path_buf(),
            args: Vec::new(),
        };
        let mut diag = ConfigDiagnostics::new();
        serve.validate(&mut diag);
        assert_eq!(diag.errors().len(), 1);
        assert_eq!(diag.errors()[0].field, ServeConfig::SDK);
    }

    #[test]
    fn test_serve_validate_ok() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(DEV_SERVER_SCRIPT), "").unwrap();
        let serve = ServeConfig {
            python: "sh".into(),
            sdk: dir.path().to_path_buf(),
            args: Vec::new(),
        };
        let mut diag = ConfigDiagnostics::new();
        serve.validate(&mut diag);
        assert!(!diag.has_errors());
    }
}
