//! Plugin registry: enabled blueprints and the directories they own.
//!
//! The registry is built once from `[project]` and then only read. Every
//! identifier maps to a directory by convention, there is no lookup by
//! import path at runtime:
//!
//! ```text
//! "blog.views"  →  name "blog"  →  <project>/blog/static/<kind>
//! ```

use crate::config::CavyConfig;
use rustc_hash::FxHashSet;

/// Plugin directory name for an identifier: the segment before the first dot.
#[inline]
pub fn plugin_name(identifier: &str) -> &str {
    identifier.split('.').next().unwrap_or(identifier)
}

/// A registered plugin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plugin {
    /// Identifier as written in the config (`blog.views`).
    pub id: String,
    /// Directory name under the project root (`blog`).
    pub name: String,
}

/// Ordered plugin registry with the primary application in front.
#[derive(Debug, Clone)]
pub struct PluginRegistry {
    main: String,
    plugins: Vec<Plugin>,
}

impl PluginRegistry {
    /// Build a registry from the primary app name and plugin identifiers.
    ///
    /// Identifiers that reduce to an already registered name (including the
    /// primary app) are dropped; the first occurrence keeps its position.
    pub fn new<S: AsRef<str>>(main: &str, identifiers: &[S]) -> Self {
        let mut seen = FxHashSet::default();
        seen.insert(main.to_string());

        let plugins = identifiers
            .iter()
            .map(AsRef::as_ref)
            .filter_map(|id| {
                let name = plugin_name(id);
                seen.insert(name.to_string()).then(|| Plugin {
                    id: id.to_string(),
                    name: name.to_string(),
                })
            })
            .collect();

        Self {
            main: main.to_string(),
            plugins,
        }
    }

    pub fn from_config(config: &CavyConfig) -> Self {
        Self::new(&config.project.main, &config.project.plugins)
    }

    /// Primary application name.
    pub fn main(&self) -> &str {
        &self.main
    }

    pub fn plugins(&self) -> &[Plugin] {
        &self.plugins
    }

    /// All application names, primary first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.main.as_str()).chain(self.plugins.iter().map(|p| p.name.as_str()))
    }
}
