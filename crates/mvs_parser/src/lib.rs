//! Front end for the module language: lexer, syntax tree and parser.
//!
//! The language is a small hardware-description subset: one `module` with a
//! port list, `wire` declarations and continuous `assign` statements over
//! `~ & | ^ + - * /`. [`parse_source`] runs the whole front end over a file in
//! a [`SourceDb`] and reports problems to a [`DiagnosticSink`].
//!
//! # Architecture
//!
//! - **Lexer** ([`lexer`]): text to [`Token`]s with spans and line/column.
//! - **Parser** ([`parser`]): recursive descent with precedence climbing for
//!   expressions; also a cheap structural check of the module header.
//! - **AST** ([`ast`]): [`Module`] and the closed [`Expr`] sum type.

#![warn(missing_docs)]

/// Syntax tree types.
pub mod ast;
mod decl;
mod expr;
/// Lexical analyzer.
pub mod lexer;
/// Parser state and entry points.
pub mod parser;
/// Token types.
pub mod token;

pub use ast::{Assign, BinaryOp, Direction, Expr, Module, Port, UnaryOp, Wire};
pub use decl::MAX_BIT_INDEX;
pub use expr::MAX_EXPR_DEPTH;
pub use lexer::tokenize;
pub use parser::{ParseError, Parser};
pub use token::{Keyword, Symbol, Token, TokenKind};

use mvs_common::NumberFormatError;
use mvs_diagnostics::code::{Category, DiagnosticCode};
use mvs_diagnostics::{Diagnostic, DiagnosticSink, Label};
use mvs_source::{FileId, SourceDb, Span};
use std::collections::HashMap;

/// Code for a name declared more than once.
pub const W_DUPLICATE_DECL: DiagnosticCode = DiagnosticCode::new(Category::Warning, 2);
/// Code for two assignments writing overlapping bits of one signal.
pub const W_OVERLAPPING_DRIVERS: DiagnosticCode = DiagnosticCode::new(Category::Warning, 4);

/// Why the front end could not produce a [`Module`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FrontendError {
    /// A numeric literal is malformed.
    #[error(transparent)]
    Number(#[from] NumberFormatError),

    /// The token stream does not form a module.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// The file id does not belong to the source database.
    #[error("no source loaded for file {0:?}")]
    MissingFile(FileId),
}

/// Lexes and parses `source`, which belongs to `file`.
///
/// Warnings (skipped characters, duplicate declarations, overlapping
/// drivers) go to `sink`. On
/// failure the error is also emitted to `sink` as a diagnostic.
pub fn parse_str(
    source: &str,
    file: FileId,
    sink: &DiagnosticSink,
) -> Result<Module, FrontendError> {
    let tokens = tokenize(source, file, sink)?;
    let mut parser = Parser::new(tokens);
    match parser.parse_module() {
        Ok(module) => {
            warn_duplicate_declarations(&module, sink);
            warn_overlapping_drivers(&module, sink);
            Ok(module)
        }
        Err(err) => {
            sink.emit(err.to_diagnostic());
            Err(err.into())
        }
    }
}

/// Parses the file `file` held by `source_db`.
pub fn parse_source(
    file: FileId,
    source_db: &SourceDb,
    sink: &DiagnosticSink,
) -> Result<Module, FrontendError> {
    let source = source_db
        .get_file(file)
        .ok_or(FrontendError::MissingFile(file))?;
    parse_str(&source.content, file, sink)
}

/// Runs the structural header check over `file`.
///
/// Returns `false` for malformed literals, a bad header, a missing
/// `endmodule`, or an unknown file.
pub fn check_source_stub(file: FileId, source_db: &SourceDb, sink: &DiagnosticSink) -> bool {
    let Some(source) = source_db.get_file(file) else {
        return false;
    };
    let Ok(tokens) = tokenize(&source.content, file, sink) else {
        return false;
    };
    let mut parser = Parser::new(tokens);
    if parser.is_module_stub_valid() {
        return true;
    }
    if let Some(err) = parser.error() {
        sink.emit(err.to_diagnostic());
    }
    false
}

/// Warns about every port or wire name declared more than once.
///
/// The module is kept; the last declaration decides the width.
fn warn_duplicate_declarations(module: &Module, sink: &DiagnosticSink) {
    let decls = module
        .ports
        .iter()
        .map(|p| (p.name.as_str(), p.span))
        .chain(module.wires.iter().map(|w| (w.name.as_str(), w.span)));

    let mut first_seen: HashMap<&str, Span> = HashMap::new();
    for (name, span) in decls {
        match first_seen.get(name) {
            Some(&first) => sink.emit(
                Diagnostic::warning(
                    W_DUPLICATE_DECL,
                    format!("'{name}' is declared more than once"),
                    span,
                )
                .with_label(Label::secondary(first, "first declared here"))
                .with_note("the last declaration determines the width"),
            ),
            None => {
                first_seen.insert(name, span);
            }
        }
    }
}

/// Warns about every assignment that writes bits another assignment to the
/// same signal already writes. The simulated value of such a signal depends
/// on the worklist schedule.
fn warn_overlapping_drivers(module: &Module, sink: &DiagnosticSink) {
    for (earlier, later) in module.overlapping_drivers() {
        let first = &module.assigns[earlier];
        let second = &module.assigns[later];
        sink.emit(
            Diagnostic::warning(
                W_OVERLAPPING_DRIVERS,
                format!("'{}' has overlapping drivers", second.target),
                second.span,
            )
            .with_label(Label::secondary(first.span, "also driven here"))
            .with_note("the final value depends on which assignment runs last"),
        );
    }
}
