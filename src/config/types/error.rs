//! Configuration errors and validation diagnostics.

use super::FieldPath;
use owo_colors::OwoColorize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading `cavy.toml`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("Config file parsing error")]
    Toml(#[from] toml::de::Error),

    #[error("Config file `{0}` not found, create it at the project root or pass --config")]
    NotFound(PathBuf),

    // No #[from]: source() would print the diagnostics twice
    #[error("{0}")]
    Diagnostics(ConfigDiagnostics),
}

/// How bad a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Loading fails.
    Error,
    /// Printed, loading continues.
    Hint,
}

/// One finding about one config field.
#[derive(Debug, Clone)]
pub struct ConfigDiagnostic {
    pub severity: Severity,
    pub field: FieldPath,
    pub message: String,
    /// How to fix it.
    pub hint: Option<String>,
}

impl fmt::Display for ConfigDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, "\n    {} {hint}", "hint:".yellow())?;
        }
        Ok(())
    }
}

/// Everything validation found during one config load.
///
/// Sections push into it and never return early, so a broken config
/// reports all of its problems at once.
#[derive(Debug, Default)]
pub struct ConfigDiagnostics {
    items: Vec<ConfigDiagnostic>,
}

impl ConfigDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        severity: Severity,
        field: FieldPath,
        message: String,
        hint: Option<String>,
    ) {
        self.items.push(ConfigDiagnostic {
            severity,
            field,
            message,
            hint,
        });
    }

    pub fn error(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Severity::Error, field, message.into(), None);
    }

    pub fn error_with_hint(
        &mut self,
        field: FieldPath,
        message: impl Into<String>,
        hint: impl Into<String>,
    ) {
        self.push(Severity::Error, field, message.into(), Some(hint.into()));
    }

    /// Record a non-fatal finding.
    pub fn hint(&mut self, field: FieldPath, message: impl Into<String>) {
        self.push(Severity::Hint, field, message.into(), None);
    }

    fn of(&self, severity: Severity) -> Vec<&ConfigDiagnostic> {
        self.items.iter().filter(|d| d.severity == severity).collect()
    }

    pub fn errors(&self) -> Vec<&ConfigDiagnostic> {
        self.of(Severity::Error)
    }

    pub fn hints(&self) -> Vec<&ConfigDiagnostic> {
        self.of(Severity::Hint)
    }

    pub fn has_errors(&self) -> bool {
        self.items.iter().any(|d| d.severity == Severity::Error)
    }

    pub fn print_hints(&self) {
        for hint in self.hints() {
            crate::log!("hint"; "{} {}", hint.field.as_str(), hint.message);
        }
    }

    /// `Err(self)` when at least one error was recorded.
    pub fn into_result(self) -> Result<(), Self> {
        if self.has_errors() { Err(self) } else { Ok(()) }
    }
}

impl fmt::Display for ConfigDiagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let errors = self.errors();
        write!(f, "{}", "invalid configuration:".red().bold())?;
        for err in &errors {
            write!(f, "\n  {} {err}", "×".red())?;
        }
        if errors.len() > 1 {
            write!(f, "\n{}", format!("{} errors", errors.len()).dimmed())?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigDiagnostics {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error, ErrorKind};

    #[test]
    fn test_config_error_display() {
        let io_err = ConfigError::Io(
            PathBuf::from("cavy.toml"),
            Error::new(ErrorKind::NotFound, "file not found"),
        );
        let display = io_err.to_string();
        assert!(display.contains("IO error"));
        assert!(display.contains("cavy.toml"));

        let not_found = ConfigError::NotFound(PathBuf::from("cavy.toml"));
        assert!(not_found.to_string().contains("cavy.toml"));
    }

    #[test]
    fn test_diagnostics_collect_everything() {
        let mut diag = ConfigDiagnostics::new();
        diag.error(FieldPath::new("project.main"), "must not be empty");
        diag.hint(FieldPath::new("minify.command"), "`uglifyjs` not found");
        diag.error_with_hint(
            FieldPath::new("styles.compiler"),
            "must not be empty",
            "set it to [\"lessc\"]",
        );

        assert!(diag.has_errors());
        assert_eq!(diag.errors().len(), 2);
        assert_eq!(diag.hints().len(), 1);
        assert_eq!(diag.errors()[1].hint.as_deref(), Some("set it to [\"lessc\"]"));

        let rendered = diag.into_result().unwrap_err().to_string();
        assert!(rendered.contains("project.main"));
        assert!(rendered.contains("styles.compiler"));
        assert!(!rendered.contains("uglifyjs"));
    }

    #[test]
    fn test_hints_alone_are_not_errors() {
        let mut diag = ConfigDiagnostics::new();
        diag.hint(FieldPath::new("styles.compiler"), "`lessc` not found");
        assert!(!diag.has_errors());
        assert!(diag.into_result().is_ok());
    }
}
