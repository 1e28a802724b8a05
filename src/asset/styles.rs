//! Style compilation: `static/less` → `static/css`.
//!
//! Only entry stylesheets are compiled: `style.less` and `*-style.less`.
//! Everything else in `less/` is a partial and is reached through
//! `@import` from an entry file.
//!
//! The primary app is always compiled with every registered `less/`
//! directory on its include path, so it can import plugin partials. In
//! independent mode each plugin is then compiled again on its own, with
//! only its own directory on the include path.

use super::layout::{
    AssetKind, SourceDirectorySet, ensure_output_dir, has_suffix, is_source_dir, sibling_dir,
    sorted_files,
};
use super::{Invocation, Launcher, PipelineError, PluginRegistry};
use crate::config::CavyConfig;
use crate::utils::plural_count;
use crate::{debug, log};
use std::ffi::{OsStr, OsString};
use std::path::Path;

/// Main stylesheet of an app.
pub const MAIN_STYLE: &str = "style.less";

/// Suffix of additional named stylesheets (`admin-style.less`).
pub const NAMED_STYLE_SUFFIX: &str = "-style.less";

#[cfg(windows)]
const PATH_LIST_SEPARATOR: char = ';';
#[cfg(not(windows))]
const PATH_LIST_SEPARATOR: char = ':';

/// Check whether a file name is a stylesheet entry point.
#[inline]
pub fn is_style_entry<S: AsRef<OsStr>>(file_name: S) -> bool {
    let file_name = file_name.as_ref();
    file_name == MAIN_STYLE || has_suffix(file_name, NAMED_STYLE_SUFFIX)
}

/// `admin-style.less` → `admin-style.css`
fn css_name(entry: &Path) -> OsString {
    let mut name = entry.file_stem().unwrap_or_default().to_os_string();
    name.push(".css");
    name
}

/// Build the `--include-path=<dir>:<dir>` option.
pub fn include_path_arg<'a, I>(dirs: I) -> Result<OsString, PipelineError>
where
    I: IntoIterator<Item = &'a Path>,
{
    let dirs: Vec<&Path> = dirs.into_iter().collect();
    if let Some(bad) = dirs
        .iter()
        .find(|d| d.as_os_str().to_string_lossy().contains(PATH_LIST_SEPARATOR))
    {
        return Err(PipelineError::IncludePath(bad.to_path_buf()));
    }

    let joined = std::env::join_paths(&dirs).map_err(|_| {
        PipelineError::IncludePath(dirs.first().map(|d| d.to_path_buf()).unwrap_or_default())
    })?;

    let mut arg = OsString::from("--include-path=");
    arg.push(joined);
    Ok(arg)
}

/// Compile all stylesheets of the primary app and, in independent mode,
/// of every plugin. Returns the number of compiler runs.
pub fn compile_styles(
    config: &CavyConfig,
    independent: bool,
    launcher: &mut dyn Launcher,
) -> Result<usize, PipelineError> {
    let registry = PluginRegistry::from_config(config);
    let dirs = SourceDirectorySet::collect(config.project_root(), &registry, AssetKind::Less);

    let shared = include_path_arg(dirs.paths())?;
    let mut compiled = compile_less_dir(config, &dirs.primary().path, &shared, launcher)?;

    if independent {
        for plugin in dirs.plugins() {
            let own = include_path_arg([plugin.path.as_path()])?;
            compiled += compile_less_dir(config, &plugin.path, &own, launcher)?;
        }
    }

    log!("styles"; "compiled {}", plural_count(compiled, "stylesheet"));
    Ok(compiled)
}

/// Compile the entry stylesheets of one `less/` directory.
fn compile_less_dir(
    config: &CavyConfig,
    less_dir: &Path,
    include_path: &OsString,
    launcher: &mut dyn Launcher,
) -> Result<usize, PipelineError> {
    if !is_source_dir(less_dir) {
        debug!("styles"; "skip {}: no such directory", less_dir.display());
        return Ok(0);
    }

    let entries: Vec<_> = sorted_files(less_dir)?
        .into_iter()
        .filter(|(name, _)| is_style_entry(name))
        .collect();
    if entries.is_empty() {
        return Ok(0);
    }

    let css_dir = sibling_dir(less_dir, AssetKind::Css);
    ensure_output_dir(&css_dir, AssetKind::Css)?;

    for (_, input) in &entries {
        let output = css_dir.join(css_name(input));

        let invocation = Invocation::new(&config.styles.compiler, config.get_root())
            .args(&config.styles.args)
            .arg(include_path)
            .arg(input)
            .arg(&output);

        debug!("styles"; "{} -> {}", input.display(), output.display());
        launcher.launch(&invocation)?;
    }

    Ok(entries.len())
}
