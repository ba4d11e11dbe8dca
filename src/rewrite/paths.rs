//! Lexical path helpers.
//!
//! Resolution is purely lexical: `..` segments are folded without touching
//! the file system, so symlinked directories are not followed.

use std::path::{Component, Path, PathBuf};

/// Fold `.` and `..` segments out of a path
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let can_pop = matches!(out.components().next_back(), Some(Component::Normal(_)));
                if can_pop {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }

    out
}

/// Join `parts` onto `base` left to right and normalize the result.
/// An absolute part replaces everything before it.
pub fn resolve<P: AsRef<Path>>(base: &Path, parts: &[P]) -> PathBuf {
    let mut joined = base.to_path_buf();
    for part in parts {
        joined.push(part.as_ref());
    }
    normalize(&joined)
}

/// Make `path` absolute against the current directory and normalize it
pub fn absolutize(path: &Path) -> std::io::Result<PathBuf> {
    if path.is_absolute() {
        return Ok(normalize(path));
    }
    Ok(normalize(&std::env::current_dir()?.join(path)))
}

/// Relative path from directory `from` to `to`, both normalized absolute paths
pub fn relative(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<Component<'_>> = from.components().collect();
    let to: Vec<Component<'_>> = to.components().collect();

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &to[common..] {
        out.push(component.as_os_str());
    }
    out
}

/// Render a path with forward slashes regardless of platform
pub fn to_slash(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Relative module reference from directory `from_dir` to `target`.
///
/// Always starts with `.` so a loader never mistakes it for a package name.
pub fn module_reference(from_dir: &Path, target: &Path) -> String {
    let rel = to_slash(&relative(from_dir, target));
    if rel.starts_with('.') {
        rel
    } else {
        format!("./{}", rel)
    }
}
