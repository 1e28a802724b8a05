//! Asset pipeline: styles, scripts, minification.
//!
//! # Module Structure
//!
//! ```text
//! asset/
//! ├── plugin.rs   # PluginRegistry (primary app + plugins)
//! ├── layout.rs   # static/<kind> directory conventions
//! ├── invoke.rs   # Invocation, Launcher, ProcessLauncher
//! ├── styles.rs   # less → css
//! ├── scripts.rs  # coffee → js
//! ├── minify.rs   # js → min.js
//! └── error.rs    # PipelineError
//! ```
//!
//! Every step walks the same ordered set of app directories, skips the
//! ones that do not exist, and stops at the first failure.

mod error;
mod invoke;
pub mod layout;
mod minify;
mod plugin;
mod scripts;
mod styles;

pub use error::PipelineError;
pub use invoke::{Invocation, Launcher, ProcessLauncher};
pub use minify::minify_scripts;
pub use plugin::{PluginRegistry, plugin_name};
pub use scripts::compile_scripts;
pub use styles::compile_styles;

#[cfg(test)]
pub(crate) mod testing {
    //! Fixtures shared by pipeline tests.

    use super::{Invocation, Launcher, PipelineError};
    use crate::config::CavyConfig;
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;

    /// Launcher that records invocations instead of running them.
    #[derive(Default)]
    pub struct RecordingLauncher {
        pub calls: Vec<Invocation>,
        materialize: bool,
        fail_at: Option<usize>,
    }

    impl RecordingLauncher {
        pub fn new() -> Self {
            Self::default()
        }

        /// Also write the files each tool would have produced.
        pub fn materializing() -> Self {
            Self {
                materialize: true,
                ..Self::default()
            }
        }

        /// Fail the `index`-th launch (zero based).
        pub fn failing_at(index: usize) -> Self {
            Self {
                fail_at: Some(index),
                ..Self::default()
            }
        }

        pub fn programs(&self) -> Vec<String> {
            self.calls.iter().map(Invocation::program_name).collect()
        }

        fn write_outputs(invocation: &Invocation) {
            let args = invocation.arg_strings();
            let after = |flag: &str| {
                args.iter()
                    .position(|a| a == flag)
                    .and_then(|i| args.get(i + 1))
                    .map(PathBuf::from)
            };

            match invocation.program_name().as_str() {
                "lessc" => {
                    if let Some(out) = args.last() {
                        fs::write(out, "").unwrap();
                    }
                }
                "coffee" => {
                    let (Some(out_dir), Some(src)) = (after("-o"), args.last()) else {
                        return;
                    };
                    if let Some(joined) = after("-j") {
                        fs::write(out_dir.join(joined), "").unwrap();
                        return;
                    }
                    for entry in fs::read_dir(src).unwrap() {
                        let path = entry.unwrap().path();
                        if let Some(stem) = path.file_stem() {
                            fs::write(out_dir.join(stem).with_extension("js"), "").unwrap();
                        }
                    }
                }
                _ => {
                    if let Some(out) = after("-o") {
                        fs::write(out, "").unwrap();
                    }
                }
            }
        }
    }

    impl Launcher for RecordingLauncher {
        fn launch(&mut self, invocation: &Invocation) -> Result<(), PipelineError> {
            self.calls.push(invocation.clone());

            if self.fail_at == Some(self.calls.len() - 1) {
                return Err(PipelineError::ToolFailed {
                    program: invocation.program_name(),
                    detail: "exit status: 1".into(),
                });
            }
            if self.materialize {
                Self::write_outputs(invocation);
            }
            Ok(())
        }
    }

    /// A temporary project with tools named `lessc`, `coffee` and `uglifyjs`.
    pub struct Fixture {
        _dir: TempDir,
        pub config: CavyConfig,
    }

    impl Fixture {
        pub fn new(plugins: &[&str]) -> Self {
            let dir = TempDir::new().unwrap();

            let mut config = CavyConfig::default();
            config.project.plugins = plugins.iter().map(|p| p.to_string()).collect();
            config.styles.compiler = vec!["lessc".into()];
            config.scripts.compiler = vec!["coffee".into()];
            config.minify.command = vec!["uglifyjs".into()];
            config.finalize(dir.path());

            Self { _dir: dir, config }
        }

        /// Absolute path of `rel` under the project root.
        pub fn path(&self, rel: &str) -> PathBuf {
            self.config.project_root().join(rel)
        }

        /// Write a file under the project root, creating parents.
        pub fn write(&self, rel: &str, content: &str) -> PathBuf {
            let path = self.path(rel);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, content).unwrap();
            path
        }

        pub fn root(&self) -> &Path {
            self.config.get_root()
        }
    }
}
