//! Per-file driver: detect, resolve, splice and print

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use futures::future::try_join_all;
use indexmap::IndexSet;
use log::{debug, trace};
use once_cell::sync::Lazy;
use regex::Regex;
use swc_core::ecma::visit::VisitMutWith;

use crate::call_site::find_context_calls;
use crate::context_builder::{build_context_call, build_imports};
use crate::error::Result;
use crate::path_resolver::ContextResolver;
use crate::source::ParsedSource;
use crate::visitor::ContextCallReplacer;

/// Cheap textual check run before parsing
static REQUIRE_CONTEXT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\brequire\s*\.\s*context\s*\(").expect("valid regex"));

/// Result of rewriting one source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Regenerated source text
    pub code: String,

    /// Directories the rewrite depended on, first-seen order, no duplicates
    pub directories: Vec<PathBuf>,
}

/// Rewrites every `require.context` call in a source file
///
/// # Arguments
///
/// * `file_path` - Absolute path of the source file
/// * `source` - The file's text
///
/// # Returns
///
/// `None` if the file contains no qualifying call and should pass through
/// unchanged, the regenerated source otherwise
pub async fn transform_source(file_path: &Path, source: String) -> Result<Option<TransformOutput>> {
    if !REQUIRE_CONTEXT_RE.is_match(&source) {
        trace!("No require.context in {}", file_path.display());
        return Ok(None);
    }

    let mut parsed = ParsedSource::parse(file_path, source)?;

    let calls = find_context_calls(&parsed.module);
    if calls.is_empty() {
        debug!(
            "No statically resolvable require.context calls in {}",
            file_path.display()
        );
        return Ok(None);
    }

    let resolver = ContextResolver::new(file_path);
    let contexts = try_join_all(calls.iter().map(|call| resolver.resolve(call))).await?;

    let mut replacer = ContextCallReplacer::new();
    let mut directories = IndexSet::new();
    // (binding, specifier) pairs already imported by an earlier call
    let mut imported = HashSet::new();

    for (call, context) in calls.iter().zip(&contexts) {
        let (line, column) = parsed.location(call.span);
        trace!(
            "{}:{}:{}: require.context('{}') -> {} modules",
            file_path.display(),
            line,
            column,
            call.directory,
            context.modules.len()
        );

        let fresh = context.modules.iter().filter(|module| {
            imported.insert((module.identifier.as_str(), module.specifier.as_str()))
        });
        replacer.prepend_imports(build_imports(fresh));
        replacer.replace(call.span, build_context_call(context, call.span));
        directories.insert(context.directory.clone());
    }

    parsed.module.visit_mut_with(&mut replacer);
    debug_assert_eq!(replacer.pending(), 0);

    let code = parsed.print()?;

    debug!(
        "Rewrote {} require.context calls in {}",
        calls.len(),
        file_path.display()
    );

    Ok(Some(TransformOutput {
        code,
        directories: directories.into_iter().collect(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_scan() {
        assert!(REQUIRE_CONTEXT_RE.is_match("require.context('./x')"));
        assert!(REQUIRE_CONTEXT_RE.is_match("require . context ("));
        assert!(REQUIRE_CONTEXT_RE.is_match("x = require\n  .context\n  ('./x')"));
        assert!(!REQUIRE_CONTEXT_RE.is_match("myrequire.context('./x')"));
        assert!(!REQUIRE_CONTEXT_RE.is_match("require('./context')"));
    }

    #[tokio::test]
    async fn test_no_call_skips_parsing() {
        // Not valid JavaScript, but never parsed
        let result = transform_source(Path::new("/src/app.js"), "let = = ;".to_string())
            .await
            .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_only_unsupported_calls() {
        let result = transform_source(
            Path::new("/src/app.js"),
            "const ctx = require.context(dir);\n".to_string(),
        )
        .await
        .unwrap();
        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn test_repeated_directory_is_imported_once() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("src/x")).unwrap();
        std::fs::write(root.path().join("src/x/a.js"), "export default 1;\n").unwrap();

        let output = transform_source(
            &root.path().join("src/app.js"),
            "const one = require.context('./x');\nconst two = require.context('./x/');\n"
                .to_string(),
        )
        .await
        .unwrap()
        .unwrap();

        assert_eq!(output.code.matches("import A from").count(), 1);
        assert_eq!(output.code.matches("default: A").count(), 2);
        assert_eq!(output.directories, vec![root.path().join("src/x")]);
    }

    #[tokio::test]
    async fn test_typescript_syntax_passes_through() {
        let root = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("src/x")).unwrap();
        std::fs::write(root.path().join("src/x/a.ts"), "export default 1;\n").unwrap();

        let output = transform_source(
            &root.path().join("src/app.ts"),
            "const limit: number = 2;\nconst ctx = require.context('./x');\n".to_string(),
        )
        .await
        .unwrap()
        .unwrap();

        // Only the call is rewritten, type annotations are left for a later compile step
        assert!(output.code.contains("const limit: number = 2;"));
        assert!(output.code.contains("import A from \"./x/a.ts\";"));
    }

    #[tokio::test]
    async fn test_parse_error_is_fatal() {
        let result = transform_source(
            Path::new("/src/app.js"),
            "const ctx = require.context('./x'\n".to_string(),
        )
        .await;
        assert!(matches!(
            result,
            Err(crate::error::ContextError::Parse { .. })
        ));
    }
}
