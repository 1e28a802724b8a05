//! Project configuration management for `cavy.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! ├── types/         # ConfigError, ConfigDiagnostics, FieldPath
//! ├── util.rs        # Config file discovery
//! └── mod.rs         # CavyConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                       |
//! |--------------|-----------------------------------------------|
//! | `[project]`  | Project root, main app, enabled plugins       |
//! | `[styles]`   | Less compiler command, independent mode       |
//! | `[scripts]`  | Coffee compiler command, join mode            |
//! | `[minify]`   | JS minifier command                           |
//! | `[serve]`    | Development server (python, SDK, args)        |
//! | `[tools]`    | Settings shared by every external tool        |
//!
//! The config is loaded once in `main` and passed by reference to every
//! operation. Nothing reads it from global state.

pub mod section;
pub mod types;
mod util;

pub use section::{
    MinifyConfig, ProjectConfig, ScriptsConfig, ServeConfig, StylesConfig, ToolsConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    log,
    utils::path::{normalize_path, resolve_with_root},
};
use anyhow::{Context, Result, bail};
use section::tools::resolve_command;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::{IsTerminal, Write},
    path::{Path, PathBuf},
};
use util::find_config_file;

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing cavy.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CavyConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Directory holding the config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Project layout and plugin registry
    pub project: ProjectConfig,

    /// Style compilation settings
    pub styles: StylesConfig,

    /// Script compilation settings
    pub scripts: ScriptsConfig,

    /// Minification settings
    pub minify: MinifyConfig,

    /// Development server settings
    pub serve: ServeConfig,

    /// Shared tool settings
    pub tools: ToolsConfig,
}

impl CavyConfig {
    /// Load configuration for the given CLI invocation.
    ///
    /// Searches upward from cwd for the config file. The directory holding
    /// it becomes the root every relative path is resolved against.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        let config_path = find_config_file(&cwd, &cli.config)
            .ok_or_else(|| ConfigError::NotFound(cli.config.clone()))?;

        let mut config = Self::from_path(&config_path)?;
        config.config_path = normalize_path(&config_path);

        let root = config
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        config.finalize(&root);
        config.apply_command_options(&cli.command);
        config.validate(&cli.command)?;

        Ok(config)
    }

    /// Read and parse a config file.
    ///
    /// Unknown keys are usually typos, so they are listed and the user is
    /// asked before continuing. Without a terminal to ask, loading goes on.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if ignored.is_empty() {
            return Ok(config);
        }

        log!("warning"; "ignoring unknown fields in {}: {}", path.display(), ignored.join(", "));
        if std::io::stdin().is_terminal() && !confirm("Continue?")? {
            bail!("Aborted due to unknown config fields");
        }
        Ok(config)
    }

    /// Parse TOML, returning the dotted paths of keys no section knows.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut unknown = Vec::new();
        let config = serde_ignored::deserialize(toml::Deserializer::new(content), |key| {
            unknown.push(key.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, unknown))
    }

    /// Get the root directory path (the directory holding `cavy.toml`)
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Project source root, where the main app and plugins live.
    pub fn project_root(&self) -> &Path {
        &self.project.root
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Resolve every configured path against `root`.
    pub fn finalize(&mut self, root: &Path) {
        let root = normalize_path(root);

        self.project.root = resolve_with_root(&self.project.root, &root);
        self.serve.sdk = resolve_with_root(&self.serve.sdk, &root);

        resolve_command(&mut self.styles.compiler, &root);
        resolve_command(&mut self.scripts.compiler, &root);
        resolve_command(&mut self.minify.command, &root);
        resolve_command(std::slice::from_mut(&mut self.serve.python), &root);

        self.root = root;
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-specific overrides from the CLI.
    pub fn apply_command_options(&mut self, command: &Commands) {
        match command {
            Commands::Styles { styles } => {
                Self::update_option(&mut self.styles.independent, styles.independent.as_ref());
            }
            Commands::Scripts { scripts } => {
                Self::update_option(&mut self.scripts.join, scripts.join.as_ref());
            }
            Commands::Minify => {}
            Commands::Build { build_args } | Commands::Serve { build_args, .. } => {
                self.apply_build_args(build_args);
            }
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        Self::update_option(&mut self.styles.independent, args.independent_styles.as_ref());
        Self::update_option(&mut self.scripts.join, args.join_scripts.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration for the given command.
    ///
    /// Collects all validation errors and returns them at once. Only the
    /// tools the command actually runs are checked.
    pub fn validate(&self, command: &Commands) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.project.validate(&mut diag);

        match command {
            Commands::Styles { .. } => self.styles.validate(&mut diag),
            Commands::Scripts { .. } => self.scripts.validate(&mut diag),
            Commands::Minify => self.minify.validate(&mut diag),
            Commands::Build { .. } => self.validate_build_tools(&mut diag),
            Commands::Serve { .. } => {
                self.validate_build_tools(&mut diag);
                self.serve.validate(&mut diag);
            }
        }

        diag.print_hints();

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }

    fn validate_build_tools(&self, diag: &mut ConfigDiagnostics) {
        self.styles.validate(diag);
        self.scripts.validate(diag);
        self.minify.validate(diag);
    }
}

/// Ask a yes/no question on stderr. Anything but `y`/`yes` is a no.
fn confirm(question: &str) -> Result<bool> {
    let mut stderr = std::io::stderr();
    write!(stderr, "{question} [y/N] ")?;
    stderr.flush()?;

    let mut answer = String::new();
    std::io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> CavyConfig {
    let (parsed, ignored) = CavyConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
