//! Directory enumeration for context calls
//!
//! Lists a directory depth-first. Subdirectories are listed concurrently, but
//! results are always assembled in the order the directory read returned its
//! entries.

use std::io;
use std::path::PathBuf;

use futures::future::{try_join_all, BoxFuture, FutureExt};
use log::trace;
use tokio::fs::{self, ReadDir};

use crate::error::{ContextError, Result};
use crate::pattern_matcher::FilePattern;

/// Lists the files below `dir`
///
/// # Arguments
///
/// * `dir` - Absolute directory to list
/// * `recursive` - Whether subdirectories are descended into
/// * `pattern` - Optional filter tested against each file's absolute path
///
/// # Returns
///
/// Absolute file paths in listing order. A directory that does not exist
/// yields no files; any other I/O failure is an error.
pub fn enumerate_files(
    dir: PathBuf,
    recursive: bool,
    pattern: Option<&FilePattern>,
) -> BoxFuture<'_, Result<Vec<PathBuf>>> {
    async move {
        let read_dir = match fs::read_dir(&dir).await {
            Ok(read_dir) => read_dir,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                trace!("Skipping missing directory {}", dir.display());
                return Ok(Vec::new());
            }
            Err(source) => return Err(ContextError::Enumerate { path: dir, source }),
        };

        let entries = match list_entries(read_dir).await {
            Ok(entries) => entries,
            Err(source) => return Err(ContextError::Enumerate { path: dir, source }),
        };

        trace!("Listed {} entries in {}", entries.len(), dir.display());

        let nested = entries.into_iter().map(move |(path, is_dir)| async move {
            if is_dir {
                if recursive {
                    enumerate_files(path, recursive, pattern).await
                } else {
                    Ok(Vec::new())
                }
            } else if pattern.map_or(true, |pattern| pattern.matches(&path)) {
                Ok(vec![path])
            } else {
                Ok(Vec::new())
            }
        });

        let files = try_join_all(nested).await?;
        Ok(files.into_iter().flatten().collect())
    }
    .boxed()
}

/// Drains a directory listing into each entry's path and whether it is a directory
///
/// Symbolic links are reported as files, they are never followed. Entries
/// removed between listing and inspection are skipped.
async fn list_entries(mut read_dir: ReadDir) -> io::Result<Vec<(PathBuf, bool)>> {
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        if let Some(file_type) = skip_vanished(entry.file_type().await)? {
            entries.push((entry.path(), file_type.is_dir()));
        }
    }

    Ok(entries)
}

/// Turns a `NotFound` failure into `None`, keeping every other error
fn skip_vanished<T>(result: io::Result<T>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
