//! Script compilation: `static/coffee` → `static/js`.
//!
//! One compiler run per existing `coffee/` directory. The compiler is given
//! the whole directory and writes bare (`-b`) output into the sibling `js/`
//! directory. In join mode all sources of an app are concatenated into
//! `<app>.js`.

use super::layout::{
    AssetKind, SourceDir, SourceDirectorySet, ensure_output_dir, is_source_dir, sibling_dir,
};
use super::{Invocation, Launcher, PipelineError, PluginRegistry};
use crate::config::CavyConfig;
use crate::utils::plural_count;
use crate::{debug, log};

/// Compile the `coffee/` directories of the primary app and every plugin.
/// Returns the number of compiler runs.
pub fn compile_scripts(
    config: &CavyConfig,
    join: bool,
    launcher: &mut dyn Launcher,
) -> Result<usize, PipelineError> {
    let registry = PluginRegistry::from_config(config);
    let dirs = SourceDirectorySet::collect(config.project_root(), &registry, AssetKind::Coffee);

    let mut compiled = 0;
    for dir in dirs.iter() {
        if !is_source_dir(&dir.path) {
            debug!("scripts"; "skip {}: no such directory", dir.path.display());
            continue;
        }

        let invocation = coffee_invocation(config, dir, join)?;
        launcher.launch(&invocation)?;
        compiled += 1;
    }

    log!("scripts"; "compiled {}", plural_count(compiled, "coffee dir"));
    Ok(compiled)
}

/// `<compiler> -c -b [-j <app>.js] -o <js_dir> <coffee_dir>`
///
/// Creates the output directory first.
fn coffee_invocation(
    config: &CavyConfig,
    dir: &SourceDir,
    join: bool,
) -> Result<Invocation, PipelineError> {
    let js_dir = sibling_dir(&dir.path, AssetKind::Js);
    ensure_output_dir(&js_dir, AssetKind::Js)?;

    let mut invocation =
        Invocation::new(&config.scripts.compiler, config.get_root()).args(["-c", "-b"]);
    if join {
        invocation = invocation.arg("-j").arg(format!("{}.js", dir.name));
    }

    Ok(invocation.arg("-o").arg(&js_dir).arg(&dir.path))
}
