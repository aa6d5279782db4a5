//! Builds the static replacement for a resolved context call
//!
//! A call resolved to modules `./a.js` and `./b/c.js` is replaced by
//!
//! ```js
//! (() => {
//!     let modules = { "./a.js": { default: A }, "./b/c.js": { default: B_C } };
//!     let context = (id) => modules[id];
//!     context.keys = () => ["./a.js", "./b/c.js"];
//!     return context;
//! })()
//! ```
//!
//! and each module gets a default import at the top of the file.

use swc_core::common::{Span, DUMMY_SP};
use swc_core::ecma::ast::{
    ArrayLit, ArrowExpr, AssignExpr, AssignOp, BlockStmt, BlockStmtOrExpr, CallExpr, Callee,
    ComputedPropName, Decl, Expr, ExprOrSpread, ExprStmt, Ident, ImportDecl,
    ImportDefaultSpecifier, ImportSpecifier, KeyValueProp, Lit, MemberExpr, MemberProp,
    ModuleDecl, ModuleItem, ObjectLit, ParenExpr, Pat, PatOrExpr, Prop, PropName, PropOrSpread,
    ReturnStmt, Stmt, Str, VarDecl, VarDeclKind, VarDeclarator,
};

use crate::path_resolver::{ResolvedContext, ResolvedModule};

const MODULES: &str = "modules";
const CONTEXT: &str = "context";
const KEYS: &str = "keys";
const ID: &str = "id";

/// Creates one default import per module, in the order given
pub fn build_imports<'a>(
    modules: impl IntoIterator<Item = &'a ResolvedModule>,
) -> Vec<ModuleItem> {
    modules.into_iter().map(import_decl).collect()
}

fn import_decl(module: &ResolvedModule) -> ModuleItem {
    ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
        span: DUMMY_SP,
        specifiers: vec![ImportSpecifier::Default(ImportDefaultSpecifier {
            span: DUMMY_SP,
            local: ident(&module.identifier),
        })],
        src: Box::new(str_lit(&module.specifier)),
        type_only: false,
        with: None,
    }))
}

/// Creates the self-invoking function that stands in for the context call
///
/// The returned call carries `span`, the span of the call it replaces.
pub fn build_context_call(context: &ResolvedContext, span: Span) -> CallExpr {
    let body = BlockStmt {
        span: DUMMY_SP,
        stmts: vec![
            let_stmt(MODULES, modules_object(&context.modules)),
            let_stmt(CONTEXT, accessor()),
            keys_stmt(&context.modules),
            Stmt::Return(ReturnStmt {
                span: DUMMY_SP,
                arg: Some(Box::new(ident_expr(CONTEXT))),
            }),
        ],
    };

    let iife = arrow(vec![], BlockStmtOrExpr::BlockStmt(body));

    CallExpr {
        span,
        callee: Callee::Expr(Box::new(Expr::Paren(ParenExpr {
            span: DUMMY_SP,
            expr: Box::new(iife),
        }))),
        args: vec![],
        type_args: None,
    }
}

/// `{ "./a.js": { default: A }, ... }`
fn modules_object(modules: &[ResolvedModule]) -> Expr {
    let props = modules
        .iter()
        .map(|module| {
            let default_export = Expr::Object(ObjectLit {
                span: DUMMY_SP,
                props: vec![key_value(
                    PropName::Ident(ident("default")),
                    ident_expr(&module.identifier),
                )],
            });

            key_value(PropName::Str(str_lit(&module.key)), default_export)
        })
        .collect();

    Expr::Object(ObjectLit {
        span: DUMMY_SP,
        props,
    })
}

/// `(id) => modules[id]`
fn accessor() -> Expr {
    let lookup = Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(ident_expr(MODULES)),
        prop: MemberProp::Computed(ComputedPropName {
            span: DUMMY_SP,
            expr: Box::new(ident_expr(ID)),
        }),
    });

    arrow(
        vec![Pat::Ident(ident(ID).into())],
        BlockStmtOrExpr::Expr(Box::new(lookup)),
    )
}

/// `context.keys = () => ["./a.js", ...];`
fn keys_stmt(modules: &[ResolvedModule]) -> Stmt {
    let keys = Expr::Array(ArrayLit {
        span: DUMMY_SP,
        elems: modules
            .iter()
            .map(|module| {
                Some(ExprOrSpread {
                    spread: None,
                    expr: Box::new(Expr::Lit(Lit::Str(str_lit(&module.key)))),
                })
            })
            .collect(),
    });

    let target = Expr::Member(MemberExpr {
        span: DUMMY_SP,
        obj: Box::new(ident_expr(CONTEXT)),
        prop: MemberProp::Ident(ident(KEYS)),
    });

    Stmt::Expr(ExprStmt {
        span: DUMMY_SP,
        expr: Box::new(Expr::Assign(AssignExpr {
            span: DUMMY_SP,
            op: AssignOp::Assign,
            left: PatOrExpr::Expr(Box::new(target)),
            right: Box::new(arrow(vec![], BlockStmtOrExpr::Expr(Box::new(keys)))),
        })),
    })
}

fn let_stmt(name: &str, init: Expr) -> Stmt {
    Stmt::Decl(Decl::Var(Box::new(VarDecl {
        span: DUMMY_SP,
        kind: VarDeclKind::Let,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name: Pat::Ident(ident(name).into()),
            init: Some(Box::new(init)),
            definite: false,
        }],
    })))
}

fn arrow(params: Vec<Pat>, body: BlockStmtOrExpr) -> Expr {
    Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        params,
        body: body.into(),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    })
}

fn key_value(key: PropName, value: Expr) -> PropOrSpread {
    PropOrSpread::Prop(Box::new(Prop::KeyValue(KeyValueProp {
        key,
        value: Box::new(value),
    })))
}

fn ident_expr(name: &str) -> Expr {
    Expr::Ident(ident(name))
}

fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP)
}

fn str_lit(value: &str) -> Str {
    Str {
        span: DUMMY_SP,
        value: value.into(),
        raw: None,
    }
}
