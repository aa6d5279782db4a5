//! Detection of `require.context(...)` calls
//!
//! Matching is purely structural: the callee must be the member expression
//! `require.context` and the arguments must be literals of the right kind.
//! Aliased `require` bindings and computed members are not followed.

use swc_core::common::Span;
use swc_core::ecma::ast::{CallExpr, Callee, Expr, ExprOrSpread, Lit, MemberProp, Module};
use swc_core::ecma::visit::{noop_visit_type, Visit, VisitWith};

/// Regular-expression literal passed as the filter argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterLiteral {
    pub pattern: String,
    pub flags: String,
}

/// A `require.context` call whose arguments can be resolved statically
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextCall {
    /// Span of the whole call expression, used to find it again when splicing
    pub span: Span,

    /// Directory literal, relative to the source file
    pub directory: String,

    /// Whether subdirectories are searched (defaults to `true`)
    pub recursive: bool,

    /// Filter matched against absolute file paths
    pub filter: Option<FilterLiteral>,
}

impl ContextCall {
    /// Matches a call expression against `require.context(dir, recursive?, filter?)`
    ///
    /// Returns `None` for any other call, and for context calls with a
    /// missing directory, a spread or non-literal argument, or a literal of the
    /// wrong kind in a known position. Arguments past the third only need to be
    /// literals and are ignored.
    pub fn from_call_expr(call: &CallExpr) -> Option<Self> {
        if !is_require_context(&call.callee) {
            return None;
        }

        let literals = call
            .args
            .iter()
            .map(literal_arg)
            .collect::<Option<Vec<&Lit>>>()?;

        let directory = match literals.first()? {
            Lit::Str(str) => str.value.to_string(),
            _ => return None,
        };

        let recursive = match literals.get(1) {
            None => true,
            Some(Lit::Bool(flag)) => flag.value,
            Some(_) => return None,
        };

        let filter = match literals.get(2) {
            None => None,
            Some(Lit::Regex(regex)) => Some(FilterLiteral {
                pattern: regex.exp.to_string(),
                flags: regex.flags.to_string(),
            }),
            Some(_) => return None,
        };

        Some(ContextCall {
            span: call.span,
            directory,
            recursive,
            filter,
        })
    }
}

fn is_require_context(callee: &Callee) -> bool {
    let Callee::Expr(expr) = callee else {
        return false;
    };
    let Expr::Member(member) = &**expr else {
        return false;
    };

    let is_require = matches!(&*member.obj, Expr::Ident(ident) if &*ident.sym == "require");
    let is_context = matches!(&member.prop, MemberProp::Ident(ident) if &*ident.sym == "context");

    is_require && is_context
}

fn literal_arg(arg: &ExprOrSpread) -> Option<&Lit> {
    if arg.spread.is_some() {
        return None;
    }
    match &*arg.expr {
        Expr::Lit(lit) => Some(lit),
        _ => None,
    }
}

/// Collects qualifying context calls in source order
#[derive(Default)]
struct ContextCallFinder {
    calls: Vec<ContextCall>,
}

impl Visit for ContextCallFinder {
    noop_visit_type!();

    fn visit_call_expr(&mut self, call: &CallExpr) {
        if let Some(context_call) = ContextCall::from_call_expr(call) {
            self.calls.push(context_call);
        }

        call.visit_children_with(self);
    }
}

/// Finds every qualifying `require.context` call in a module
pub fn find_context_calls(module: &Module) -> Vec<ContextCall> {
    let mut finder = ContextCallFinder::default();
    module.visit_with(&mut finder);
    finder.calls
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ParsedSource;
    use std::path::Path;

    fn calls_in(code: &str) -> Vec<ContextCall> {
        let parsed = ParsedSource::parse(Path::new("/src/app.js"), code.to_string())
            .expect("Failed to parse test source");
        find_context_calls(&parsed.module)
    }

    #[test]
    fn test_directory_only() {
        let calls = calls_in("const ctx = require.context('./pages');");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].directory, "./pages");
        assert!(calls[0].recursive);
        assert_eq!(calls[0].filter, None);
    }

    #[test]
    fn test_all_arguments() {
        let calls = calls_in(r#"require.context("../x", false, /\.test\.js$/i);"#);
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].directory, "../x");
        assert!(!calls[0].recursive);
        assert_eq!(
            calls[0].filter,
            Some(FilterLiteral {
                pattern: r"\.test\.js$".to_string(),
                flags: "i".to_string(),
            })
        );
    }

    #[test]
    fn test_fourth_argument_is_ignored() {
        let calls = calls_in("require.context('./x', true, /\\.js$/, 'sync');");
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].directory, "./x");
    }

    #[test]
    fn test_calls_are_in_source_order() {
        let calls = calls_in(
            "const a = require.context('./a');\nfunction f() { return require.context('./b', false); }",
        );
        let dirs: Vec<_> = calls.iter().map(|call| call.directory.as_str()).collect();
        assert_eq!(dirs, vec!["./a", "./b"]);
    }

    #[test]
    fn test_nested_in_other_expressions() {
        let calls = calls_in("register(require.context('./a'));\nrequire.context('./b')('./c.js');");
        assert_eq!(calls.len(), 2);
    }

    #[test]
    fn test_non_literal_arguments_disqualify() {
        assert!(calls_in("require.context(dir);").is_empty());
        assert!(calls_in("require.context(`./x`);").is_empty());
        assert!(calls_in("require.context('./x', recursive);").is_empty());
        assert!(calls_in("require.context('./x', true, pattern);").is_empty());
        assert!(calls_in("require.context(...args);").is_empty());
    }

    #[test]
    fn test_wrong_literal_kinds_disqualify() {
        assert!(calls_in("require.context();").is_empty());
        assert!(calls_in("require.context(42);").is_empty());
        assert!(calls_in("require.context('./x', 'yes');").is_empty());
        assert!(calls_in("require.context('./x', true, '.js');").is_empty());
    }

    #[test]
    fn test_other_callees_are_ignored() {
        assert!(calls_in("require('./x');").is_empty());
        assert!(calls_in("req.context('./x');").is_empty());
        assert!(calls_in("require.resolve('./x');").is_empty());
        assert!(calls_in("require['context']('./x');").is_empty());
        assert!(calls_in("const r = require; r.context('./x');").is_empty());
    }

    #[test]
    fn test_span_covers_call() {
        let code = "const ctx = require.context('./pages');";
        let calls = calls_in(code);
        let span = calls[0].span;
        assert!(span.hi > span.lo);
    }
}
