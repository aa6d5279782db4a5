//! Pattern matcher module for the require.context transform
//!
//! This module compiles the regular-expression literal of a context call into
//! a filter for enumerated file paths.

use std::path::Path;

use regex::{Regex, RegexBuilder};

use crate::error::{ContextError, Result};

/// Compiled filter for enumerated file paths
#[derive(Debug, Clone)]
pub struct FilePattern {
    regex: Regex,
}

impl FilePattern {
    /// Compiles a regular-expression literal's body and flags
    ///
    /// `i`, `m` and `s` keep their meaning. Flags that only affect stateful
    /// matching or escapes (`g`, `y`, `u`, `d`, `v`) make no difference to a
    /// single `test` against a path and are ignored.
    pub fn new(pattern: &str, flags: &str) -> Result<Self> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(flags.contains('i'))
            .multi_line(flags.contains('m'))
            .dot_matches_new_line(flags.contains('s'))
            .build()
            .map_err(|source| ContextError::InvalidPattern {
                pattern: pattern.to_string(),
                flags: flags.to_string(),
                source,
            })?;

        Ok(FilePattern { regex })
    }

    /// Checks if an absolute file path matches this pattern anywhere
    pub fn matches(&self, path: &Path) -> bool {
        self.regex.is_match(&path.to_string_lossy())
    }
}
