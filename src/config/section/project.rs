//! `[project]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [project]
//! root = "project"                       # project source root (relative to cavy.toml)
//! main = "cavy"                          # primary application directory
//! plugins = ["blog.views", "admin"]      # enabled blueprints, in registration order
//! ```
//!
//! A plugin identifier may be a dotted module path. Its directory is the
//! part before the first dot, so `blog.views` lives in `<root>/blog/`.

use crate::config::{ConfigDiagnostics, FieldPath};
use crate::utils::path::is_single_component;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Project source root.
    pub root: PathBuf,

    /// Primary application name (directory under `root`).
    pub main: String,

    /// Enabled plugin identifiers.
    pub plugins: Vec<String>,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: "project".into(),
            main: "cavy".into(),
            plugins: Vec::new(),
        }
    }
}

impl ProjectConfig {
    pub const MAIN: FieldPath = FieldPath::new("project.main");
    pub const PLUGINS: FieldPath = FieldPath::new("project.plugins");
    pub const ROOT: FieldPath = FieldPath::new("project.root");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !is_single_component(&self.main) {
            diag.error_with_hint(
                Self::MAIN,
                format!("`{}` is not a directory name", self.main),
                format!("{} names a directory directly under {}", Self::MAIN, Self::ROOT),
            );
        }

        for (idx, id) in self.plugins.iter().enumerate() {
            let name = crate::asset::plugin_name(id);
            if !is_single_component(name) {
                diag.error(
                    Self::PLUGINS,
                    format!("[{idx}] `{id}` does not name a plugin directory"),
                );
            }
        }
    }
}
