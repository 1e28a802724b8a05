//! Cavy - asset pipeline and dev server launcher for App Engine projects.

mod asset;
mod cli;
mod config;
mod core;
mod logger;
mod utils;

use anyhow::Result;
use asset::{
    PipelineError, PluginRegistry, ProcessLauncher, compile_scripts, compile_styles,
    minify_scripts,
};
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands, build::build_assets, serve::run_dev_server};
use config::CavyConfig;
use utils::plural_count;

/// Exit code for a broken project layout. Matches clap's usage errors.
const CONFIG_ERROR_EXIT_CODE: i32 = 2;

fn main() -> Result<()> {
    match run() {
        Err(err) if is_config_problem(&err) => {
            log!("error"; "{err:#}");
            log!("hint"; "fix the project layout, then run cavy again");
            std::process::exit(CONFIG_ERROR_EXIT_CODE);
        }
        result => result,
    }
}

/// Layout problems are reported apart from tool failures.
fn is_config_problem(err: &anyhow::Error) -> bool {
    err.downcast_ref::<PipelineError>()
        .is_some_and(PipelineError::is_config_error)
}

fn run() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = CavyConfig::load(&cli)?;
    debug!("config"; "loaded {}", config.config_path.display());

    let registry = PluginRegistry::from_config(&config);
    let plugins = plural_count(registry.plugins().len(), "plugin");
    debug!("config"; "app `{}` with {plugins}", registry.main());
    for plugin in registry.plugins() {
        debug!("config"; "plugin `{}` -> {}/", plugin.id, plugin.name);
    }

    let mut launcher = ProcessLauncher::new(config.tools.pty);

    match &cli.command {
        Commands::Styles { .. } => {
            compile_styles(&config, config.styles.independent, &mut launcher)?;
        }
        Commands::Scripts { .. } => {
            compile_scripts(&config, config.scripts.join, &mut launcher)?;
        }
        Commands::Minify => {
            minify_scripts(&config, &mut launcher)?;
        }
        Commands::Build { .. } => {
            build_assets(&config, &mut launcher)?;
        }
        Commands::Serve { args, .. } => run_dev_server(&config, args, &mut launcher)?,
    }

    Ok(())
}
