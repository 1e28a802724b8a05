//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Cavy asset pipeline CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: cavy.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "cavy.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Compile `style.less` and `*-style.less` into css/
    #[command(visible_alias = "l")]
    Styles {
        #[command(flatten)]
        styles: StyleArgs,
    },

    /// Compile coffee/ sources into js/
    #[command(visible_alias = "c")]
    Scripts {
        #[command(flatten)]
        scripts: ScriptArgs,
    },

    /// Minify js/ files into `*.min.js`
    #[command(visible_alias = "m")]
    Minify,

    /// Compile styles, compile scripts, then minify
    #[command(visible_alias = "b")]
    Build {
        #[command(flatten)]
        build_args: BuildArgs,
    },

    /// Build, then start the local development server
    #[command(visible_alias = "s")]
    Serve {
        #[command(flatten)]
        build_args: BuildArgs,

        /// Extra arguments passed to the dev server (after `--`)
        #[arg(last = true, value_name = "ARGS")]
        args: Vec<String>,
    },
}

/// Style step arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct StyleArgs {
    /// Also compile each plugin's styles on its own
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub independent: Option<bool>,
}

/// Script step arguments.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct ScriptArgs {
    /// Join all scripts of an app into `<app>.js`
    #[arg(short, long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub join: Option<bool>,
}

/// Shared arguments for Build and Serve commands
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Also compile each plugin's styles on its own
    #[arg(short = 'i', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub independent_styles: Option<bool>,

    /// Join all scripts of an app into `<app>.js`
    #[arg(short = 'j', long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub join_scripts: Option<bool>,
}
