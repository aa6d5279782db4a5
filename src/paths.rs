//! Path utilities for the require.context transform
//!
//! This module provides lexical path resolution and the two relative path
//! forms a context call needs: lookup keys and import specifiers.

use std::borrow::Cow;
use std::io;
use std::path::{Component, Path, PathBuf};

use path_absolutize::Absolutize;

/// Makes a path absolute against the process working directory
///
/// `.` and `..` components are collapsed without touching the file system.
pub fn absolute_path(path: &Path) -> io::Result<PathBuf> {
    path.absolutize().map(Cow::into_owned)
}

/// Calculates the path of `to_path` relative to the directory `from_dir`
///
/// # Arguments
///
/// * `from_dir` - The absolute directory the result is relative to
/// * `to_path` - The absolute target path
///
/// # Returns
///
/// A `/` separated path that always starts with `./` or `../`, or `None` if
/// no relative path exists between the two
pub fn resolve_relative_path(from_dir: &Path, to_path: &Path) -> Option<String> {
    let diff = pathdiff::diff_paths(to_path, from_dir)?;

    let mut parts = Vec::new();
    for component in diff.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::ParentDir => parts.push(Cow::Borrowed("..")),
            Component::CurDir => {}
            Component::RootDir | Component::Prefix(_) => return None,
        }
    }

    if parts.first().is_some_and(|part| *part == "..") {
        return Some(parts.join("/"));
    }

    Some(format!("./{}", parts.join("/")))
}

/// Joins two path segments together, handling normalization of path components
///
/// # Arguments
///
/// * `path` - The base path
/// * `path2` - The path to join to the base path
///
/// # Returns
///
/// A normalized joined path
pub fn path_join(path: &Path, path2: &str) -> PathBuf {
    let joined_path = path.join(path2);

    let mut components = Vec::new();

    for component in joined_path.components() {
        match component {
            Component::ParentDir => {
                match components.last() {
                    Some(Component::Normal(_)) => {
                        components.pop();
                    }
                    // `/..` is `/`
                    Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                    _ => components.push(component),
                }
            }
            Component::CurDir => {}
            _ => components.push(component),
        }
    }

    components.iter().collect()
}

/// Gets the directory name of a path
///
/// Returns an empty path if the path has no parent.
pub fn dirname(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_default()
}
