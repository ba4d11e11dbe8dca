use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::constants::scan::OUTPUT_EXTENSIONS;
use crate::rewrite::paths;
use crate::types::{AliasError, Result};

/// Enumerates compiled files under the output root.
///
/// Dotfiles are included and no ignore files are honoured: compiled output
/// is usually gitignored, which is exactly what we need to visit.
pub struct OutputScanner {
    root: PathBuf,
}

impl OutputScanner {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Matching files in lexicographic path order
    pub fn scan(&self) -> Result<Vec<ScannedFile>> {
        if !self.root.is_dir() {
            warn!("Output root does not exist: {}", self.root.display());
            return Ok(Vec::new());
        }

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .hidden(false)
            .follow_links(false)
            .build();

        let mut files = Vec::new();

        for entry in walker {
            let entry = entry.map_err(|e| walk_error(&self.root, e))?;
            let path = entry.path();

            let is_file = entry.file_type().is_some_and(|t| t.is_file());
            if !is_file || !has_output_extension(path) {
                continue;
            }

            let relative = path
                .strip_prefix(&self.root)
                .map(paths::to_slash)
                .unwrap_or_else(|_| paths::to_slash(path));

            files.push(ScannedFile {
                path: path.to_path_buf(),
                relative,
            });
        }

        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }

    #[cfg(test)]
    fn paths(&self) -> Result<Vec<String>> {
        Ok(self.scan()?.into_iter().map(|f| f.relative).collect())
    }
}

/// `a.js` matches by extension; a file named exactly `.js` matches too
fn has_output_extension(path: &Path) -> bool {
    let extension = path.extension().and_then(|e| e.to_str()).or_else(|| {
        path.file_name()
            .and_then(|n| n.to_str())
            .and_then(|n| n.strip_prefix('.'))
    });

    extension.is_some_and(|ext| OUTPUT_EXTENSIONS.contains(&ext))
}

/// Keep the path that could not be walked in the error
fn walk_error(root: &Path, err: ignore::Error) -> AliasError {
    let path = failed_path(&err).unwrap_or(root).to_path_buf();
    let message = err.to_string();
    let source = err
        .into_io_error()
        .unwrap_or_else(|| std::io::Error::other(message));
    AliasError::IoAt { path, source }
}

fn failed_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            failed_path(err)
        }
        _ => None,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Path relative to the output root, forward slashes
    pub relative: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "").unwrap();
    }

    #[test]
    fn test_scan_filters_by_extension_and_sorts() {
        let temp = TempDir::new().unwrap();
        for rel in [
            "b.js",
            "a.ts",
            "nested/c.tsx",
            "nested/d.jsx",
            "types/e.d.ts",
            "styles.css",
            "data.json",
            "map.js.map",
        ] {
            touch(temp.path(), rel);
        }

        let paths = OutputScanner::new(temp.path()).paths().unwrap();
        assert_eq!(
            paths,
            vec!["a.ts", "b.js", "nested/c.tsx", "nested/d.jsx", "types/e.d.ts"]
        );
    }

    #[test]
    fn test_scan_includes_dotfiles_and_ignored_files() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".hidden/x.js");
        touch(temp.path(), ".eslintrc.js");
        touch(temp.path(), "ignored/y.js");
        fs::write(temp.path().join(".gitignore"), "ignored/\n").unwrap();

        let paths = OutputScanner::new(temp.path()).paths().unwrap();
        assert_eq!(paths, vec![".eslintrc.js", ".hidden/x.js", "ignored/y.js"]);
    }

    #[test]
    fn test_directories_with_matching_names_are_skipped() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("weird.js")).unwrap();
        touch(temp.path(), "weird.js/inner.js");

        let paths = OutputScanner::new(temp.path()).paths().unwrap();
        assert_eq!(paths, vec!["weird.js/inner.js"]);
    }

    #[test]
    fn test_missing_root_yields_nothing() {
        let temp = TempDir::new().unwrap();
        let files = OutputScanner::new(temp.path().join("dist")).scan().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_bare_extension_file_names_match() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), ".js");
        touch(temp.path(), ".tsx");
        touch(temp.path(), ".css");
        touch(temp.path(), "a.js");

        let paths = OutputScanner::new(temp.path()).paths().unwrap();
        assert_eq!(paths, vec![".js", ".tsx", "a.js"]);
    }

    #[test]
    fn test_walk_error_names_failed_path() {
        let err = ignore::Error::WithDepth {
            depth: 2,
            err: Box::new(ignore::Error::WithPath {
                path: PathBuf::from("/out/locked"),
                err: Box::new(ignore::Error::Io(std::io::Error::new(
                    std::io::ErrorKind::PermissionDenied,
                    "denied",
                ))),
            }),
        };

        let err = walk_error(Path::new("/out"), err);
        assert!(err.to_string().contains("/out/locked"));
        match err {
            AliasError::IoAt { path, source } => {
                assert_eq!(path, PathBuf::from("/out/locked"));
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_walk_error_without_path_falls_back_to_root() {
        let err = ignore::Error::Io(std::io::Error::other("boom"));
        match walk_error(Path::new("/out"), err) {
            AliasError::IoAt { path, .. } => assert_eq!(path, PathBuf::from("/out")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
