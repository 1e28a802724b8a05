//! Asset pipeline errors.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// A missing source directory is never an error: the step skips it.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// An output directory path exists but is not a directory.
    #[error("Target {kind} dir \"{}\" is not a directory", path.display())]
    NotADirectory { kind: &'static str, path: PathBuf },

    #[error("failed to create `{}`", .0.display())]
    CreateDir(PathBuf, #[source] std::io::Error),

    #[error("failed to read `{}`", .0.display())]
    ReadDir(PathBuf, #[source] std::io::Error),

    #[error("include path `{}` contains the path list separator", .0.display())]
    IncludePath(PathBuf),

    /// An external tool could not be started or exited non-zero.
    #[error("`{program}` failed\n{detail}")]
    ToolFailed { program: String, detail: String },
}

impl PipelineError {
    /// Whether this is a configuration problem rather than a tool failure.
    pub const fn is_config_error(&self) -> bool {
        matches!(self, Self::NotADirectory { .. } | Self::IncludePath(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_a_directory_names_path() {
        let err = PipelineError::NotADirectory {
            kind: "CSS",
            path: PathBuf::from("/site/project/cavy/static/css"),
        };
        assert_eq!(
            err.to_string(),
            "Target CSS dir \"/site/project/cavy/static/css\" is not a directory"
        );
        assert!(err.is_config_error());
    }

    #[test]
    fn test_tool_failure_is_not_config_error() {
        let err = PipelineError::ToolFailed {
            program: "lessc".into(),
            detail: "ParseError".into(),
        };
        assert!(!err.is_config_error());
        assert!(err.to_string().contains("ParseError"));
    }
}
