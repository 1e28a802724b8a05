//! Filesystem layout of an application's static assets.
//!
//! ```text
//! <project>/<app>/static/less/    →  <project>/<app>/static/css/
//! <project>/<app>/static/coffee/  →  <project>/<app>/static/js/
//! ```
//!
//! Output directories are siblings of their source directory.

use super::{PipelineError, PluginRegistry};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Static asset directory kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    Less,
    Css,
    Coffee,
    Js,
}

impl AssetKind {
    /// Directory name under `static/`.
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Less => "less",
            Self::Css => "css",
            Self::Coffee => "coffee",
            Self::Js => "js",
        }
    }

    /// Label used in error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Less => "LESS",
            Self::Css => "CSS",
            Self::Coffee => "Coffee",
            Self::Js => "JS",
        }
    }
}

/// `<project>/<app>/static/<kind>`
pub fn static_dir(project_root: &Path, app: &str, kind: AssetKind) -> PathBuf {
    project_root.join(app).join("static").join(kind.dir_name())
}

/// Sibling output directory of a source directory (`static/less` → `static/css`).
pub fn sibling_dir(source_dir: &Path, kind: AssetKind) -> PathBuf {
    source_dir
        .parent()
        .unwrap_or(source_dir)
        .join(kind.dir_name())
}

/// Make sure `path` is a usable output directory.
///
/// Creates it (recursively) when nothing is there. Anything else at `path`
/// that does not resolve to a directory, including a dangling symlink, is a
/// configuration error; it is never removed or overwritten.
pub fn ensure_output_dir(path: &Path, kind: AssetKind) -> Result<(), PipelineError> {
    match fs::symlink_metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            fs::create_dir_all(path).map_err(|e| PipelineError::CreateDir(path.to_path_buf(), e))?;
        }
        Err(e) => return Err(PipelineError::CreateDir(path.to_path_buf(), e)),
    }

    if !path.is_dir() {
        return Err(PipelineError::NotADirectory {
            kind: kind.label(),
            path: path.to_path_buf(),
        });
    }

    Ok(())
}

/// Check whether a source directory should be processed.
///
/// Missing paths, and paths that are not directories, are skipped.
#[inline]
pub fn is_source_dir(path: &Path) -> bool {
    path.is_dir()
}

/// List regular files of a directory, sorted by file name.
///
/// Names are kept as `OsString`, so files whose names are not UTF-8 are
/// listed like any other.
pub fn sorted_files(dir: &Path) -> Result<Vec<(OsString, PathBuf)>, PipelineError> {
    let read_err = |e: std::io::Error| PipelineError::ReadDir(dir.to_path_buf(), e);

    let mut files = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_err)? {
        let entry = entry.map_err(read_err)?;
        let path = entry.path();
        if path.is_file() {
            files.push((entry.file_name(), path));
        }
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(files)
}

/// Byte-level suffix check that works for non UTF-8 names.
#[inline]
pub fn has_suffix(file_name: &OsStr, suffix: &str) -> bool {
    file_name.as_encoded_bytes().ends_with(suffix.as_bytes())
}

/// One application's directory of a given kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDir {
    /// Application name (`cavy`, `blog`).
    pub name: String,
    pub path: PathBuf,
}

/// Ordered source directories of one kind: the primary app first, then
/// every plugin in registry order. Directories may not exist.
#[derive(Debug, Clone)]
pub struct SourceDirectorySet {
    entries: Vec<SourceDir>,
}

impl SourceDirectorySet {
    pub fn collect(project_root: &Path, registry: &PluginRegistry, kind: AssetKind) -> Self {
        let entries = registry
            .names()
            .map(|name| SourceDir {
                name: name.to_string(),
                path: static_dir(project_root, name, kind),
            })
            .collect();
        Self { entries }
    }

    pub fn primary(&self) -> &SourceDir {
        &self.entries[0]
    }

    pub fn plugins(&self) -> &[SourceDir] {
        &self.entries[1..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &SourceDir> {
        self.entries.iter()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.entries.iter().map(|e| e.path.as_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_static_dir_convention() {
        let dir = static_dir(Path::new("/p"), "blog", AssetKind::Less);
        assert_eq!(dir, PathBuf::from("/p/blog/static/less"));
    }

    #[test]
    fn test_sibling_dir() {
        let css = sibling_dir(Path::new("/p/blog/static/less"), AssetKind::Css);
        assert_eq!(css, PathBuf::from("/p/blog/static/css"));
        let js = sibling_dir(Path::new("/p/blog/static/coffee"), AssetKind::Js);
        assert_eq!(js, PathBuf::from("/p/blog/static/js"));
    }

    #[test]
    fn test_ensure_output_dir_creates_recursively() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("a/b/css");
        ensure_output_dir(&out, AssetKind::Css).unwrap();
        assert!(out.is_dir());
        // Existing directory is fine
        ensure_output_dir(&out, AssetKind::Css).unwrap();
    }

    #[test]
    fn test_ensure_output_dir_rejects_file() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("css");
        fs::write(&out, "not a dir").unwrap();

        let err = ensure_output_dir(&out, AssetKind::Css).unwrap_err();
        match err {
            PipelineError::NotADirectory { kind, path } => {
                assert_eq!(kind, "CSS");
                assert_eq!(path, out);
            }
            other => panic!("unexpected error: {other}"),
        }
        // File left untouched
        assert_eq!(fs::read_to_string(&out).unwrap(), "not a dir");
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_output_dir_rejects_dangling_symlink() {
        let dir = TempDir::new().unwrap();
        let out = dir.path().join("css");
        std::os::unix::fs::symlink(dir.path().join("gone"), &out).unwrap();

        let err = ensure_output_dir(&out, AssetKind::Css).unwrap_err();
        assert!(err.is_config_error());
        assert!(!dir.path().join("gone").exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_ensure_output_dir_follows_symlink_to_dir() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("real")).unwrap();
        let out = dir.path().join("css");
        std::os::unix::fs::symlink(dir.path().join("real"), &out).unwrap();

        ensure_output_dir(&out, AssetKind::Css).unwrap();
    }

    #[test]
    fn test_sorted_files_skips_dirs() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.js"), "").unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();
        fs::create_dir(dir.path().join("c.js")).unwrap();

        let names: Vec<_> = sorted_files(dir.path())
            .unwrap()
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["a.js", "b.js"]);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_sorted_files_keeps_non_utf8_names() {
        use std::os::unix::ffi::OsStrExt;

        let dir = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.js");
        fs::write(dir.path().join(name), "").unwrap();
        fs::write(dir.path().join("app.js"), "").unwrap();

        let files = sorted_files(dir.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[1].0, name);
        assert!(has_suffix(&files[1].0, ".js"));
    }

    #[test]
    fn test_has_suffix() {
        assert!(has_suffix(OsStr::new("style.less"), ".less"));
        assert!(!has_suffix(OsStr::new("style.less.bak"), ".less"));
    }

    #[test]
    fn test_source_directory_set_order() {
        let registry = PluginRegistry::new("cavy", &["blog", "admin.views"]);
        let set = SourceDirectorySet::collect(Path::new("/p"), &registry, AssetKind::Coffee);

        assert_eq!(set.primary().name, "cavy");
        assert_eq!(set.primary().path, PathBuf::from("/p/cavy/static/coffee"));
        let plugins: Vec<_> = set.plugins().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(plugins, ["blog", "admin"]);
        assert_eq!(set.paths().count(), 3);
    }
}
