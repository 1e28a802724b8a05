//! Utility modules shared by the pipeline and the CLI.

pub mod exec;
pub mod path;

/// Format count with noun, handling pluralization
///
/// - `plural_count(0, "stylesheet")` -> `"0 stylesheets"`
/// - `plural_count(1, "stylesheet")` -> `"1 stylesheet"`
#[inline]
pub fn plural_count(count: usize, noun: &str) -> String {
    let suffix = if count == 1 { "" } else { "s" };
    format!("{count} {noun}{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plural_count() {
        assert_eq!(plural_count(0, "file"), "0 files");
        assert_eq!(plural_count(1, "file"), "1 file");
        assert_eq!(plural_count(3, "directory run"), "3 directory runs");
    }
}
