//! `[scripts]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [scripts]
//! join = false                                           # one `<app>.js` per app when true
//! compiler = ["node_modules/coffee-script/bin/coffee"]   # coffee compiler command
//! ```

use super::tools::validate_command;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptsConfig {
    /// Join every script of an app into `<app>.js`.
    pub join: bool,

    /// Script compiler command.
    pub compiler: Vec<String>,
}

impl Default for ScriptsConfig {
    fn default() -> Self {
        Self {
            join: false,
            compiler: vec!["node_modules/coffee-script/bin/coffee".into()],
        }
    }
}

impl ScriptsConfig {
    pub const COMPILER: FieldPath = FieldPath::new("scripts.compiler");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_command(&self.compiler, Self::COMPILER, diag);
    }
}
