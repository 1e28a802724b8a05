//! External process invocation shared by every pipeline step.
//!
//! Steps never spawn processes themselves. They build an [`Invocation`]
//! (program, arguments, working directory) and hand it to a [`Launcher`],
//! which decides how to run it and turns failures into
//! [`PipelineError::ToolFailed`].

use super::PipelineError;
use crate::utils::exec::{Cmd, NODE_FILTER};
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A single external tool run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Program followed by its arguments.
    pub command: Vec<OsString>,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Invocation {
    /// Start from a configured command array (`["npx", "lessc"]`).
    pub fn new<S: AsRef<OsStr>>(command: &[S], cwd: &Path) -> Self {
        Self {
            command: command.iter().map(|s| s.as_ref().to_owned()).collect(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg<S: AsRef<OsStr>>(mut self, arg: S) -> Self {
        self.command.push(arg.as_ref().to_owned());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.command
            .extend(args.into_iter().map(|a| a.as_ref().to_owned()));
        self
    }

    /// Program name for log and error messages (file name only).
    pub fn program_name(&self) -> String {
        self.command
            .first()
            .map(|p| {
                Path::new(p)
                    .file_name()
                    .unwrap_or(p.as_os_str())
                    .to_string_lossy()
                    .into_owned()
            })
            .unwrap_or_default()
    }

    /// Arguments after the program, lossily converted.
    #[cfg(test)]
    pub fn arg_strings(&self) -> Vec<String> {
        self.command
            .iter()
            .skip(1)
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    /// Convert into a command builder.
    pub fn to_cmd(&self) -> Cmd {
        Cmd::from_slice(&self.command).cwd(&self.cwd)
    }
}

/// Runs invocations. A non-zero exit must come back as an error.
pub trait Launcher {
    fn launch(&mut self, invocation: &Invocation) -> Result<(), PipelineError>;
}

/// Launcher that runs real processes, one at a time, blocking.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher {
    /// Run tools under a pseudo-terminal.
    pub pty: bool,
}

impl ProcessLauncher {
    pub const fn new(pty: bool) -> Self {
        Self { pty }
    }
}

impl Launcher for ProcessLauncher {
    fn launch(&mut self, invocation: &Invocation) -> Result<(), PipelineError> {
        let cmd = invocation.to_cmd().pty(self.pty).filter(&NODE_FILTER);
        crate::debug!("exec"; "{}", cmd.display());

        cmd.run()
            .map(|_| ())
            .map_err(|e| PipelineError::ToolFailed {
                program: invocation.program_name(),
                detail: format!("{e:#}"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder() {
        let inv = Invocation::new(&["/site/node_modules/less/bin/lessc"], Path::new("/site"))
            .arg("-x")
            .args(["in.less", "out.css"]);

        assert_eq!(inv.program_name(), "lessc");
        assert_eq!(inv.arg_strings(), ["-x", "in.less", "out.css"]);
        assert_eq!(inv.cwd, PathBuf::from("/site"));
    }

    #[test]
    fn test_process_launcher_success() {
        let dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new(&["true"], dir.path());
        ProcessLauncher::default().launch(&inv).unwrap();
    }

    #[test]
    fn test_process_launcher_maps_failure() {
        let dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new(&["sh", "-c", "echo boom >&2; exit 3"], dir.path());

        let err = ProcessLauncher::default().launch(&inv).unwrap_err();
        match err {
            PipelineError::ToolFailed { program, detail } => {
                assert_eq!(program, "sh");
                assert!(detail.contains("boom"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_process_launcher_runs_in_cwd() {
        let dir = tempfile::TempDir::new().unwrap();
        let inv = Invocation::new(&["sh", "-c", "echo hi > marker.txt"], dir.path());
        ProcessLauncher::default().launch(&inv).unwrap();
        assert!(dir.path().join("marker.txt").is_file());
    }
}
