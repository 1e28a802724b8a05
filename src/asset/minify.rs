//! Minification: `static/js/*.js` → `static/js/*.min.js`.
//!
//! Files already ending in `.min.js` are never inputs, so running the step
//! twice minifies the same set of files both times.

use super::layout::{AssetKind, SourceDirectorySet, has_suffix, is_source_dir, sorted_files};
use super::{Invocation, Launcher, PipelineError, PluginRegistry};
use crate::config::CavyConfig;
use crate::utils::plural_count;
use crate::{debug, log};
use std::ffi::{OsStr, OsString};
use std::path::Path;

const MINIFIED_SUFFIX: &str = ".min.js";

/// Check whether a file name is a minification input.
#[inline]
pub fn is_minify_input<S: AsRef<OsStr>>(file_name: S) -> bool {
    let file_name = file_name.as_ref();
    has_suffix(file_name, ".js") && !has_suffix(file_name, MINIFIED_SUFFIX)
}

/// `app.js` → `app.min.js`
fn minified_name(input: &Path) -> OsString {
    let mut name = input.file_stem().unwrap_or_default().to_os_string();
    name.push(MINIFIED_SUFFIX);
    name
}

/// Minify every script in the `js/` directories of the primary app and
/// every plugin. Returns the number of files minified.
pub fn minify_scripts(
    config: &CavyConfig,
    launcher: &mut dyn Launcher,
) -> Result<usize, PipelineError> {
    let registry = PluginRegistry::from_config(config);
    let dirs = SourceDirectorySet::collect(config.project_root(), &registry, AssetKind::Js);

    let mut minified = 0;
    for dir in dirs.iter() {
        if !is_source_dir(&dir.path) {
            debug!("minify"; "skip {}: no such directory", dir.path.display());
            continue;
        }

        // Listed up front: outputs written below must not become inputs.
        let inputs: Vec<_> = sorted_files(&dir.path)?
            .into_iter()
            .filter(|(name, _)| is_minify_input(name))
            .collect();

        for (_, input) in inputs {
            let output = dir.path.join(minified_name(&input));
            let invocation = Invocation::new(&config.minify.command, config.get_root())
                .args(&config.minify.args)
                .arg("-o")
                .arg(&output)
                .arg(&input);

            launcher.launch(&invocation)?;
            minified += 1;
        }
    }

    log!("minify"; "minified {}", plural_count(minified, "script"));
    Ok(minified)
}
