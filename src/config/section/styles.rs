//! `[styles]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [styles]
//! independent = true                          # also compile each plugin on its own
//! compiler = ["node_modules/less/bin/lessc"]  # less compiler command
//! args = ["-x"]                               # options passed before --include-path
//! ```

use super::tools::validate_command;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StylesConfig {
    /// Compile plugin stylesheets independently after the shared pass.
    pub independent: bool,

    /// Style compiler command.
    pub compiler: Vec<String>,

    /// Extra compiler options.
    pub args: Vec<String>,
}

impl Default for StylesConfig {
    fn default() -> Self {
        Self {
            independent: true,
            compiler: vec!["node_modules/less/bin/lessc".into()],
            args: vec!["-x".into()],
        }
    }
}

impl StylesConfig {
    pub const COMPILER: FieldPath = FieldPath::new("styles.compiler");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_command(&self.compiler, Self::COMPILER, diag);
    }
}

#[cfg(test)]
mod tests {
    use crate::config::test_parse_config;

    #[test]
    fn test_styles_defaults() {
        let config = test_parse_config("");
        assert!(config.styles.independent);
        assert_eq!(config.styles.args, ["-x"]);
        assert!(config.styles.compiler[0].ends_with("lessc"));
    }

    #[test]
    fn test_styles_override() {
        let config = test_parse_config(
            "[styles]\nindependent = false\ncompiler = [\"npx\", \"lessc\"]\nargs = []",
        );
        assert!(!config.styles.independent);
        assert_eq!(config.styles.compiler, ["npx", "lessc"]);
        assert!(config.styles.args.is_empty());
    }
}
