//! Splices generated context expressions and imports into a module

use std::collections::HashMap;

use swc_core::common::Span;
use swc_core::ecma::ast::{CallExpr, Module, ModuleItem};
use swc_core::ecma::visit::{noop_visit_mut_type, VisitMut, VisitMutWith};

/// Visitor for splicing generated context expressions into a module
#[derive(Default)]
pub struct ContextCallReplacer {
    /// Map of call spans to their replacements
    /// The key is the span of the original `require.context` call
    replacements: HashMap<Span, CallExpr>,

    /// Imports to be prepended to the module
    imports: Vec<ModuleItem>,
}

impl ContextCallReplacer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the replacement for the call at `span`
    pub fn replace(&mut self, span: Span, replacement: CallExpr) {
        self.replacements.insert(span, replacement);
    }

    /// Queues imports to be placed before everything else in the module
    pub fn prepend_imports(&mut self, imports: Vec<ModuleItem>) {
        self.imports.extend(imports);
    }

    /// Number of registered calls not found in the module yet
    pub fn pending(&self) -> usize {
        self.replacements.len()
    }
}

impl VisitMut for ContextCallReplacer {
    noop_visit_mut_type!();

    fn visit_mut_module(&mut self, module: &mut Module) {
        module.visit_mut_children_with(self);

        module.body.splice(0..0, self.imports.drain(..));
    }

    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        call.visit_mut_children_with(self);

        // The node is overwritten in place and keeps its original span
        if let Some(mut replacement) = self.replacements.remove(&call.span) {
            replacement.span = call.span;
            *call = replacement;
        }
    }
}
