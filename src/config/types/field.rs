//! Config field path.

use owo_colors::OwoColorize;
use std::fmt;

/// A dotted path to a field in `cavy.toml` (e.g. `styles.compiler`).
///
/// Sections declare their fields as associated constants so diagnostics
/// always point at a key that really exists:
///
/// ```ignore
/// impl StylesConfig {
///     pub const COMPILER: FieldPath = FieldPath::new("styles.compiler");
/// }
///
/// diag.error(StylesConfig::COMPILER, "must not be empty");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldPath(pub &'static str);

impl FieldPath {
    #[inline]
    pub const fn new(path: &'static str) -> Self {
        Self(path)
    }

    #[inline]
    pub const fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_args!("`{}`", self.0).bright_blue())
    }
}
