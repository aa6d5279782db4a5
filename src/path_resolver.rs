//! Resolution of context calls into the modules they import

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use log::{trace, warn};

use crate::call_site::ContextCall;
use crate::error::Result;
use crate::file_enumerator::enumerate_files;
use crate::identifier::module_identifier;
use crate::paths::{dirname, path_join, resolve_relative_path};
use crate::pattern_matcher::FilePattern;

/// A file pulled in by a context call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedModule {
    /// Absolute path of the file
    pub path: PathBuf,

    /// Lookup key, relative to the context directory (`./b/c.js`)
    pub key: String,

    /// Import specifier, relative to the source file (`./x/b/c.js`)
    pub specifier: String,

    /// Binding name of the default import
    pub identifier: String,
}

/// Everything a single context call expands to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedContext {
    /// Absolute directory the call resolved against
    pub directory: PathBuf,

    /// Matched files, in enumeration order
    pub modules: Vec<ResolvedModule>,
}

/// Resolves context calls made from one source file
#[derive(Debug, Clone)]
pub struct ContextResolver {
    /// Directory containing the source file
    source_dir: PathBuf,
}

impl ContextResolver {
    /// Creates a resolver for the absolute path of a source file
    pub fn new(source_file: &Path) -> Self {
        ContextResolver {
            source_dir: dirname(source_file),
        }
    }

    /// Absolute directory a context call refers to
    pub fn target_dir(&self, call: &ContextCall) -> PathBuf {
        path_join(&self.source_dir, &call.directory)
    }

    /// Enumerates the files a context call refers to
    pub async fn resolve(&self, call: &ContextCall) -> Result<ResolvedContext> {
        let directory = self.target_dir(call);
        let pattern = call
            .filter
            .as_ref()
            .map(|filter| FilePattern::new(&filter.pattern, &filter.flags))
            .transpose()?;

        let files = enumerate_files(directory.clone(), call.recursive, pattern.as_ref()).await?;

        let modules: Vec<ResolvedModule> = files
            .into_iter()
            .filter_map(|file| self.resolve_module(&directory, file))
            .collect();

        trace!(
            "require.context('{}') resolved to {} modules in {}",
            call.directory,
            modules.len(),
            directory.display()
        );
        warn_on_collisions(&directory, &modules);

        Ok(ResolvedContext { directory, modules })
    }

    fn resolve_module(&self, directory: &Path, path: PathBuf) -> Option<ResolvedModule> {
        let key = resolve_relative_path(directory, &path)?;
        let specifier = resolve_relative_path(&self.source_dir, &path)?;
        let identifier = module_identifier(&key);

        Some(ResolvedModule {
            path,
            key,
            specifier,
            identifier,
        })
    }
}

/// Logs modules whose import names collide; the later import shadows the earlier
fn warn_on_collisions(directory: &Path, modules: &[ResolvedModule]) {
    let mut seen: HashMap<&str, &str> = HashMap::new();

    for module in modules {
        if let Some(previous) = seen.insert(&module.identifier, &module.key) {
            warn!(
                "require.context in {}: '{}' and '{}' are both imported as `{}`",
                directory.display(),
                previous,
                module.key,
                module.identifier
            );
        }
    }
}
