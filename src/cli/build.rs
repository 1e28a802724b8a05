//! Full asset build.
//!
//! Pipeline: styles -> scripts -> minify
//!
//! Minification runs last so it sees the scripts compiled in this run.
//! The first failing step aborts the build.

use crate::{
    asset::{Launcher, PipelineError, compile_scripts, compile_styles, minify_scripts},
    config::CavyConfig,
    log,
    utils::plural_count,
};
use std::time::Instant;

/// Counts reported by a finished build.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildSummary {
    pub stylesheets: usize,
    pub script_dirs: usize,
    pub minified: usize,
}

/// Run every pipeline step with the modes configured in `config`.
pub fn build_assets(
    config: &CavyConfig,
    launcher: &mut dyn Launcher,
) -> Result<BuildSummary, PipelineError> {
    let start = Instant::now();

    let summary = BuildSummary {
        stylesheets: compile_styles(config, config.styles.independent, launcher)?,
        script_dirs: compile_scripts(config, config.scripts.join, launcher)?,
        minified: minify_scripts(config, launcher)?,
    };

    log!("build"; "{} in {:.2?}", plural_count(summary.tool_runs(), "tool run"), start.elapsed());
    Ok(summary)
}

impl BuildSummary {
    pub const fn tool_runs(&self) -> usize {
        self.stylesheets + self.script_dirs + self.minified
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::testing::{Fixture, RecordingLauncher};

    fn populated(plugins: &[&str]) -> Fixture {
        let fx = Fixture::new(plugins);
        fx.write("cavy/static/less/style.less", "");
        fx.write("cavy/static/coffee/app.coffee", "");
        for plugin in plugins {
            fx.write(&format!("{plugin}/static/less/style.less"), "");
        }
        fx
    }

    #[test]
    fn test_step_order() {
        let fx = populated(&["blog"]);
        let mut launcher = RecordingLauncher::materializing();

        let summary = build_assets(&fx.config, &mut launcher).unwrap();

        assert_eq!(launcher.programs(), ["lessc", "lessc", "coffee", "uglifyjs"]);
        // Default script mode is separate: no joined output
        assert!(!launcher.calls[2].arg_strings().iter().any(|a| a == "-j"));
        assert_eq!(
            summary,
            BuildSummary {
                stylesheets: 2,
                script_dirs: 1,
                minified: 1,
            }
        );
        assert_eq!(summary.tool_runs(), 4);
    }

    #[test]
    fn test_minify_sees_fresh_scripts() {
        let fx = populated(&[]);
        let mut launcher = RecordingLauncher::materializing();

        build_assets(&fx.config, &mut launcher).unwrap();

        let minify = launcher.calls.last().unwrap();
        assert_eq!(
            minify.arg_strings().last().unwrap(),
            &fx.path("cavy/static/js/app.js").display().to_string()
        );
        assert!(fx.path("cavy/static/js/app.min.js").is_file());
    }

    #[test]
    fn test_configured_modes_are_used() {
        let mut fx = populated(&["blog"]);
        fx.config.styles.independent = false;
        fx.config.scripts.join = true;
        let mut launcher = RecordingLauncher::new();

        build_assets(&fx.config, &mut launcher).unwrap();

        assert_eq!(launcher.programs(), ["lessc", "coffee"]);
        assert!(launcher.calls[1].arg_strings().contains(&"cavy.js".to_string()));
    }

    #[test]
    fn test_failure_stops_later_steps() {
        let fx = populated(&[]);
        let mut launcher = RecordingLauncher::failing_at(0);

        assert!(build_assets(&fx.config, &mut launcher).is_err());
        assert_eq!(launcher.programs(), ["lessc"]);
    }
}
