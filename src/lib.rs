//! require.context transform
//!
//! Rewrites `require.context(dir, recursive?, filter?)` calls into static
//! default imports of every matching file plus a small lookup function, so
//! bundlers that cannot follow directory globs still see each module.
//! Directories each file depended on are tracked so file-system changes can
//! invalidate exactly the files that referenced them.

mod call_site;
mod config;
mod context_builder;
mod context_transformer;
mod error;
mod file_enumerator;
mod identifier;
mod path_resolver;
mod paths;
mod pattern_matcher;
mod plugin;
mod source;
mod tracker;
mod visitor;

pub use call_site::{find_context_calls, ContextCall, FilterLiteral};
pub use config::{Config, DEFAULT_EXTENSION};
pub use context_transformer::{transform_source, TransformOutput};
pub use error::{ContextError, Result};
pub use identifier::module_identifier;
pub use path_resolver::{ContextResolver, ResolvedContext, ResolvedModule};
pub use plugin::{ChangeNotifier, RequireContextPlugin, ResolveExtensions};
pub use tracker::DependencyTracker;
