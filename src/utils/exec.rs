//! External tool execution.
//!
//! [`Cmd`] is a small builder over `std::process::Command` and
//! `portable-pty`. Pipeline tools run through [`Cmd::run`], which captures
//! their output, forwards the interesting lines to the log and fails on a
//! non-zero exit. The dev server runs through [`Cmd::run_inherited`] and
//! owns the terminal until it exits.
//!
//! ```ignore
//! Cmd::from_slice(&["npx", "lessc", "-x", "style.less", "style.css"])
//!     .cwd(root)
//!     .filter(&NODE_FILTER)
//!     .run()?;
//!
//! let status = Cmd::from_slice(&["python", "dev_appserver.py"]).run_inherited()?;
//! ```

use crate::log;
use anyhow::{Context, Result, anyhow, bail};
use portable_pty::{CommandBuilder, NativePtySystem, PtySize, PtySystem};
use regex::Regex;
use std::{
    borrow::Cow,
    ffi::{OsStr, OsString},
    io::Read,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
    sync::LazyLock,
};

/// Terminal size reported to tools running under a PTY.
const PTY_SIZE: PtySize = PtySize {
    rows: 24,
    cols: 120,
    pixel_width: 0,
    pixel_height: 0,
};

static ANSI_ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;?]*[A-Za-z]").expect("valid ANSI regex"));

/// Command builder for external process execution.
#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    pty: bool,
    filter: Option<&'static FilterRule>,
}

/// What a finished tool printed.
#[derive(Debug, Clone, Default)]
pub struct ToolOutput {
    pub stdout: String,
    /// Empty under a PTY, where both streams arrive on `stdout`.
    pub stderr: String,
}

impl Cmd {
    /// Split a full command line into program and arguments.
    pub fn from_slice<S: AsRef<OsStr>>(command: &[S]) -> Self {
        let mut parts = command.iter().map(|s| s.as_ref().to_owned());
        Self {
            program: parts.next().unwrap_or_default(),
            args: parts.collect(),
            ..Self::default()
        }
    }

    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Run under a pseudo-terminal, so tools keep their colored diagnostics.
    pub fn pty(mut self, enable: bool) -> Self {
        self.pty = enable;
        self
    }

    /// Lines matching `filter` are not forwarded to the log.
    pub fn filter(mut self, filter: &'static FilterRule) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Run to completion with captured output. A non-zero exit is an error
    /// carrying everything the tool printed.
    pub fn run(self) -> Result<ToolOutput> {
        let (success, code, output) = if self.pty {
            self.capture_pty()?
        } else {
            self.capture()?
        };

        let filter = self.filter.unwrap_or(&EMPTY_FILTER);
        if !success {
            bail!(self.failure_message(code, &output, filter));
        }

        filter.log(&self.name(), &output.stderr);
        if self.pty {
            filter.log(&self.name(), &output.stdout);
        }
        Ok(output)
    }

    /// Run attached to the current terminal and wait for it.
    ///
    /// The exit status is returned as-is.
    pub fn run_inherited(self) -> Result<ExitStatus> {
        self.command()
            .status()
            .with_context(|| format!("Failed to execute `{}`", self.name()))
    }

    /// Command line for log output.
    pub fn display(&self) -> String {
        std::iter::once(&self.program)
            .chain(&self.args)
            .map(|s| s.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        if let Some(dir) = &self.cwd {
            command.current_dir(dir);
        }
        command
    }

    fn capture(&self) -> Result<(bool, String, ToolOutput)> {
        let output = self
            .command()
            .output()
            .with_context(|| format!("Failed to execute `{}`", self.name()))?;

        Ok((
            output.status.success(),
            output.status.to_string(),
            ToolOutput {
                stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            },
        ))
    }

    fn capture_pty(&self) -> Result<(bool, String, ToolOutput)> {
        let mut builder = CommandBuilder::new(&self.program);
        builder.args(&self.args);
        if let Some(dir) = &self.cwd {
            builder.cwd(dir);
        }

        let pair = NativePtySystem::default().openpty(PTY_SIZE)?;
        let mut child = pair
            .slave
            .spawn_command(builder)
            .with_context(|| format!("Failed to spawn `{}`", self.name()))?;
        drop(pair.slave);

        // The master blocks until EOF, so drain it off-thread while waiting.
        let mut reader = pair.master.try_clone_reader()?;
        let drain = std::thread::spawn(move || {
            let mut buf = String::new();
            let _ = reader.read_to_string(&mut buf);
            buf
        });

        let status = child.wait()?;
        drop(pair.master);
        let stdout = drain
            .join()
            .map_err(|_| anyhow!("PTY reader thread panicked"))?;

        Ok((
            status.success(),
            format!("exit code: {}", status.exit_code()),
            ToolOutput {
                stdout,
                stderr: String::new(),
            },
        ))
    }

    fn failure_message(&self, code: String, output: &ToolOutput, filter: &FilterRule) -> String {
        let mut msg = format!("Command `{}` failed with {code}", self.name());
        for stream in [&output.stderr, &output.stdout] {
            let kept = filter.keep(stream);
            if !kept.is_empty() {
                msg.push('\n');
                msg.push_str(&kept.join("\n"));
            }
        }
        msg
    }
}

// ============================================================================
// Output filtering
// ============================================================================

/// Prefixes of tool output lines that are noise.
#[derive(Debug)]
pub struct FilterRule {
    pub skip_prefixes: &'static [&'static str],
}

impl FilterRule {
    pub const fn new(skip_prefixes: &'static [&'static str]) -> Self {
        Self { skip_prefixes }
    }

    fn should_skip(&self, line: &str) -> bool {
        line.is_empty() || self.skip_prefixes.iter().any(|p| line.starts_with(p))
    }

    /// Non-empty lines of `output` that pass the filter.
    fn keep<'a>(&self, output: &'a str) -> Vec<&'a str> {
        output
            .lines()
            .filter(|line| !self.should_skip(strip_ansi(line).trim()))
            .collect()
    }

    /// Forward kept lines to the log under the tool's name.
    pub fn log(&self, name: &str, output: &str) {
        let lines = self.keep(output);
        if !lines.is_empty() {
            log!(name; "{}", lines.join("\n"));
        }
    }
}

pub const EMPTY_FILTER: FilterRule = FilterRule::new(&[]);

/// Node deprecation chatter printed by old lessc/coffee/uglify releases.
pub const NODE_FILTER: FilterRule =
    FilterRule::new(&["(node:", "DeprecationWarning", "(Use `node"]);

fn strip_ansi(s: &str) -> Cow<'_, str> {
    ANSI_ESCAPE.replace_all(s, "")
}
