//! Development server.
//!
//! Builds all assets, then runs the SDK's `dev_appserver.py` on the project
//! root in the foreground until it exits.

use crate::{
    asset::{Invocation, Launcher},
    cli::build::build_assets,
    config::CavyConfig,
    core::{ChildGuard, is_shutdown},
    log,
};
use anyhow::{Result, bail};
use std::process::ExitStatus;

/// `<python> <sdk>/dev_appserver.py <serve.args> <extra_args> <project_root>`
pub fn dev_server_invocation(config: &CavyConfig, extra_args: &[String]) -> Invocation {
    Invocation::new(std::slice::from_ref(&config.serve.python), config.get_root())
        .arg(config.serve.script())
        .args(&config.serve.args)
        .args(extra_args)
        .arg(config.project_root())
}

/// Build, then run the dev server attached to the terminal.
pub fn run_dev_server(
    config: &CavyConfig,
    extra_args: &[String],
    launcher: &mut dyn Launcher,
) -> Result<()> {
    build_assets(config, launcher)?;

    let invocation = dev_server_invocation(config, extra_args);
    let cmd = invocation.to_cmd();
    log!("serve"; "{}", cmd.display());

    let status = {
        let _guard = ChildGuard::enter();
        cmd.run_inherited()?
    };

    server_outcome(status, is_shutdown())
}

/// After Ctrl+C a non-zero exit is the server shutting down, not a failure.
fn server_outcome(status: ExitStatus, interrupted: bool) -> Result<()> {
    if !status.success() && !interrupted {
        bail!("dev server exited with {status}");
    }
    Ok(())
}
