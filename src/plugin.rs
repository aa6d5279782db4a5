//! Host pipeline entry points
//!
//! The host claims files by extension, forwards file-system change events and
//! asks the plugin to load each claimed file.

use std::path::Path;
use std::sync::Arc;

use log::debug;
use tokio::fs;

use crate::config::{normalize_extension, Config};
use crate::context_transformer::transform_source;
use crate::error::{ContextError, Result};
use crate::paths::absolute_path;
use crate::tracker::DependencyTracker;

/// Receives invalidation signals for source files whose output is stale
pub trait ChangeNotifier {
    /// Marks `file` as changed so the host loads it again
    fn mark_changed(&self, file: &Path);
}

impl<F> ChangeNotifier for F
where
    F: Fn(&Path),
{
    fn mark_changed(&self, file: &Path) {
        self(file)
    }
}

/// Extensions the plugin consumes and produces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveExtensions {
    pub input: Vec<String>,
    pub output: Vec<String>,
}

/// The require-context plugin as seen by the host pipeline
pub struct RequireContextPlugin {
    /// Extensions claimed, each starting with a dot
    input: Vec<String>,

    /// Extensions emitted
    output: Vec<String>,

    /// Directory dependencies shared for the whole build session
    tracker: Arc<DependencyTracker>,
}

impl RequireContextPlugin {
    pub const NAME: &'static str = "require-context-plugin";

    /// Creates the plugin with the specified configuration
    pub fn new(config: Config, tracker: Arc<DependencyTracker>) -> Self {
        RequireContextPlugin {
            input: config.input_extensions(),
            output: config.output_extensions(),
            tracker,
        }
    }

    /// Creates the plugin from the host's JSON plugin options
    pub fn from_json(options: &str, tracker: Arc<DependencyTracker>) -> Result<Self> {
        let config: Config = serde_json::from_str(options)?;
        Ok(Self::new(config, tracker))
    }

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    pub fn resolve(&self) -> ResolveExtensions {
        ResolveExtensions {
            input: self.input.clone(),
            output: self.output.clone(),
        }
    }

    /// Whether files with `extension` are handled by this plugin
    pub fn claims(&self, extension: &str) -> bool {
        let extension = normalize_extension(extension);
        self.input.iter().any(|input| *input == extension)
    }

    /// Marks every source file depending on a directory containing
    /// `changed_path` as changed
    ///
    /// Returns the number of files marked. Nothing is re-transformed here; the
    /// host decides when to load the files again.
    pub fn on_change(&self, changed_path: &Path, host: &dyn ChangeNotifier) -> usize {
        let changed_path =
            absolute_path(changed_path).unwrap_or_else(|_| changed_path.to_path_buf());

        let affected = self.tracker.affected_by(&changed_path);
        for file in &affected {
            debug!(
                "{} changed, marking {} as stale",
                changed_path.display(),
                file.display()
            );
            host.mark_changed(file);
        }

        affected.len()
    }

    /// Loads and transforms a source file
    ///
    /// # Returns
    ///
    /// The regenerated source, or `None` if the file has no qualifying
    /// `require.context` call and should pass through to other handlers. On
    /// error the file's tracker entry is left as it was.
    pub async fn load(&self, file_path: &Path) -> Result<Option<String>> {
        let file_path = absolute_path(file_path).map_err(|source| ContextError::Read {
            path: file_path.to_path_buf(),
            source,
        })?;

        let source = fs::read_to_string(&file_path)
            .await
            .map_err(|source| ContextError::Read {
                path: file_path.clone(),
                source,
            })?;

        match transform_source(&file_path, source).await? {
            Some(output) => {
                self.tracker.record(&file_path, output.directories);
                Ok(Some(output.code))
            }
            None => {
                self.tracker.remove(&file_path);
                Ok(None)
            }
        }
    }

    /// The dependency tracker this plugin records into
    pub fn tracker(&self) -> &DependencyTracker {
        &self.tracker
    }
}
