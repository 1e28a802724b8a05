//! `[minify]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [minify]
//! command = ["node_modules/uglify-js/bin/uglifyjs"]   # minifier command
//! args = ["--compress"]                               # options passed before -o
//! ```

use super::tools::validate_command;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MinifyConfig {
    /// Minifier command.
    pub command: Vec<String>,

    /// Extra minifier options.
    pub args: Vec<String>,
}

impl Default for MinifyConfig {
    fn default() -> Self {
        Self {
            command: vec!["node_modules/uglify-js/bin/uglifyjs".into()],
            args: Vec::new(),
        }
    }
}

impl MinifyConfig {
    pub const COMMAND: FieldPath = FieldPath::new("minify.command");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_command(&self.command, Self::COMMAND, diag);
    }
}
