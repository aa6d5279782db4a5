//! Parsing source text into a module and printing it back

use std::io;
use std::path::{Path, PathBuf};

use swc_core::common::sync::Lrc;
use swc_core::common::{FileName, SourceMap, Span, Spanned};
use swc_core::ecma::ast::{EsVersion, Module};
use swc_core::ecma::codegen::text_writer::JsWriter;
use swc_core::ecma::codegen::{Config as CodegenConfig, Emitter};
use swc_core::ecma::parser::error::Error as ParserError;
use swc_core::ecma::parser::{parse_file_as_module, EsConfig, Syntax, TsConfig};

use crate::error::{ContextError, Result};

/// A source file parsed for one transform
///
/// The module is owned exclusively by the transform and dropped after printing.
pub struct ParsedSource {
    path: PathBuf,
    cm: Lrc<SourceMap>,
    pub module: Module,
}

impl ParsedSource {
    /// Parses source text as a module
    ///
    /// Errors the parser recovered from are still reported as a parse failure.
    pub fn parse(path: &Path, text: String) -> Result<Self> {
        let cm: Lrc<SourceMap> = Default::default();
        let fm = cm.new_source_file(FileName::Real(path.to_path_buf()), text);

        let mut recovered = Vec::new();
        let module = parse_file_as_module(
            &fm,
            syntax_for(path),
            EsVersion::EsNext,
            None,
            &mut recovered,
        )
        .map_err(|err| parse_error(&cm, path, err))?;

        if let Some(err) = recovered.into_iter().next() {
            return Err(parse_error(&cm, path, err));
        }

        Ok(ParsedSource {
            path: path.to_path_buf(),
            cm,
            module,
        })
    }

    /// Regenerates source text from the (possibly mutated) module
    pub fn print(&self) -> Result<String> {
        let mut buf = Vec::new();

        {
            let mut cfg = CodegenConfig::default();
            cfg.target = EsVersion::EsNext;

            let mut emitter = Emitter {
                cfg,
                cm: self.cm.clone(),
                comments: None,
                wr: JsWriter::new(self.cm.clone(), "\n", &mut buf, None),
            };

            emitter
                .emit_module(&self.module)
                .map_err(|source| self.print_error(source))?;
        }

        String::from_utf8(buf)
            .map_err(|err| self.print_error(io::Error::new(io::ErrorKind::InvalidData, err)))
    }

    /// Line and column of a span in this file, both 1-based
    pub fn location(&self, span: Span) -> (usize, usize) {
        let loc = self.cm.lookup_char_pos(span.lo);
        (loc.line, loc.col.0 + 1)
    }

    fn print_error(&self, source: io::Error) -> ContextError {
        ContextError::Print {
            path: self.path.clone(),
            source,
        }
    }
}

/// Picks the parser syntax from the file extension
fn syntax_for(path: &Path) -> Syntax {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ts" | "mts" | "cts") => Syntax::Typescript(TsConfig::default()),
        Some("tsx") => Syntax::Typescript(TsConfig {
            tsx: true,
            ..Default::default()
        }),
        Some("jsx") => Syntax::Es(EsConfig {
            jsx: true,
            ..Default::default()
        }),
        _ => Syntax::Es(EsConfig::default()),
    }
}

fn parse_error(cm: &SourceMap, path: &Path, err: ParserError) -> ContextError {
    let loc = cm.lookup_char_pos(err.span().lo);
    ContextError::Parse {
        path: path.to_path_buf(),
        line: loc.line,
        column: loc.col.0 + 1,
        message: err.kind().msg().to_string(),
    }
}
