//! Dependency tracker for the require.context transform
//!
//! Remembers which directories each source file's context calls resolved
//! against, so a file-system change can be mapped back to the source files
//! whose output is now stale.

use std::path::{Path, PathBuf};

use dashmap::DashMap;

/// Map of source files to the directories their last transform depended on
///
/// One tracker lives for a whole build session and is shared by every
/// concurrent transform. Each entry is only ever replaced or removed as a
/// whole.
#[derive(Debug, Default)]
pub struct DependencyTracker {
    directories: DashMap<PathBuf, Vec<PathBuf>>,
}

impl DependencyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the directories recorded for `file`
    pub fn record(&self, file: &Path, directories: Vec<PathBuf>) {
        self.directories.insert(file.to_path_buf(), directories);
    }

    /// Forgets `file`, returning whether it was tracked
    pub fn remove(&self, file: &Path) -> bool {
        self.directories.remove(file).is_some()
    }

    /// Source files that depend on a directory containing `changed_path`
    ///
    /// A directory contains a path if it is one of the path's ancestors (or the
    /// path itself). The result is sorted.
    pub fn affected_by(&self, changed_path: &Path) -> Vec<PathBuf> {
        let mut affected: Vec<PathBuf> = self
            .directories
            .iter()
            .filter(|entry| entry.value().iter().any(|dir| changed_path.starts_with(dir)))
            .map(|entry| entry.key().clone())
            .collect();

        affected.sort();
        affected
    }

    /// Directories recorded for `file`
    pub fn directories_for(&self, file: &Path) -> Option<Vec<PathBuf>> {
        self.directories.get(file).map(|entry| entry.value().clone())
    }

    /// Clears the tracker
    pub fn clear(&self) {
        self.directories.clear();
    }

    /// Returns the number of tracked source files
    pub fn len(&self) -> usize {
        self.directories.len()
    }

    /// Returns whether no source file is tracked
    pub fn is_empty(&self) -> bool {
        self.directories.is_empty()
    }
}
