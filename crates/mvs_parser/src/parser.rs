//! Parser state, token primitives and the two entry points.
//!
//! [`Parser::parse_module`] builds a full [`Module`]. [`Parser::is_module_stub_valid`]
//! checks only the header and the presence of `endmodule`. Both stop at the
//! first violation and record it; later failures never replace the recorded
//! error.

use crate::ast::Module;
use crate::token::{Keyword, Symbol, Token, TokenKind};
use mvs_diagnostics::code::{Category, DiagnosticCode};
use mvs_diagnostics::{Diagnostic, Label};
use mvs_source::Span;
use serde::{Deserialize, Serialize};

/// Code for a syntax error.
pub const E_SYNTAX: DiagnosticCode = DiagnosticCode::new(Category::Error, 101);

/// A syntax error at a specific token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("{line}:{col}: {message}")]
pub struct ParseError {
    /// What was expected and what was found.
    pub message: String,
    /// Line of the offending token.
    pub line: u32,
    /// Column of the offending token.
    pub col: u32,
    /// Span of the offending token.
    pub span: Span,
}

impl ParseError {
    /// Converts the error into an `E101` diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(E_SYNTAX, self.message.clone(), self.span)
            .with_label(Label::primary(self.span, "here"))
    }
}

/// Recursive-descent parser over a token stream.
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) pos: usize,
    pub(crate) depth: usize,
    error: Option<ParseError>,
}

impl Parser {
    /// Creates a parser. An [`TokenKind::End`] token is appended if missing.
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::End) {
            let (span, line, col) = tokens
                .last()
                .map(|t| (Span::new(t.span.file, t.span.end, t.span.end), t.line, t.col))
                .unwrap_or((Span::DUMMY, 1, 1));
            tokens.push(Token {
                kind: TokenKind::End,
                text: String::new(),
                span,
                line,
                col,
                value: None,
            });
        }
        Self {
            tokens,
            pos: 0,
            depth: 0,
            error: None,
        }
    }

    /// The first error recorded by either entry point.
    pub fn error(&self) -> Option<&ParseError> {
        self.error.as_ref()
    }

    /// Returns `true` once any parse has failed.
    pub fn has_error(&self) -> bool {
        self.error.is_some()
    }

    // ========================================================================
    // Entry points
    // ========================================================================

    /// Parses one complete module:
    ///
    /// ```text
    /// module NAME ( ports ) [;] { wire ... ; | assign ... ; } endmodule
    /// ```
    pub fn parse_module(&mut self) -> Result<Module, ParseError> {
        self.pos = 0;
        let start = self.current().span;
        self.expect_keyword(Keyword::Module)?;
        let name = self.expect_ident()?;
        let ports = self.parse_port_list()?;
        self.eat_symbol(Symbol::Semicolon);

        let mut wires = Vec::new();
        let mut assigns = Vec::new();
        loop {
            match self.current().keyword() {
                Some(Keyword::Wire) => wires.extend(self.parse_wire_decl()?),
                Some(Keyword::Assign) => assigns.push(self.parse_assign()?),
                Some(Keyword::EndModule) => {
                    self.advance();
                    break;
                }
                _ => return self.fail_expected("'wire', 'assign' or 'endmodule'"),
            }
        }

        Ok(Module {
            name,
            ports,
            wires,
            assigns,
            span: start.to(self.prev_span()),
        })
    }

    /// Checks `module NAME ( ports ) [;]` and then scans for `endmodule`
    /// without interpreting the body.
    pub fn is_module_stub_valid(&mut self) -> bool {
        self.pos = 0;
        self.check_stub().is_ok()
    }

    fn check_stub(&mut self) -> Result<(), ParseError> {
        self.expect_keyword(Keyword::Module)?;
        self.expect_ident()?;
        self.parse_port_list()?;
        self.eat_symbol(Symbol::Semicolon);
        while self.current().keyword() != Some(Keyword::EndModule) {
            if self.at_end() {
                return self.fail_expected("'endmodule'");
            }
            self.advance();
        }
        Ok(())
    }

    // ========================================================================
    // Primitive operations
    // ========================================================================

    pub(crate) fn current(&self) -> &Token {
        // `new` guarantees a trailing End token and `advance` never passes it.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub(crate) fn prev_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.tokens[prev].span,
            None => self.current().span,
        }
    }

    pub(crate) fn at_end(&self) -> bool {
        self.current().kind == TokenKind::End
    }

    pub(crate) fn advance(&mut self) {
        if !self.at_end() {
            self.pos += 1;
        }
    }

    pub(crate) fn at_symbol(&self, sym: Symbol) -> bool {
        self.current().is_symbol(sym)
    }

    pub(crate) fn eat_symbol(&mut self, sym: Symbol) -> bool {
        if self.at_symbol(sym) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_symbol(&mut self, sym: Symbol) -> Result<Span, ParseError> {
        let span = self.current().span;
        if self.eat_symbol(sym) {
            Ok(span)
        } else {
            self.fail_expected(&format!("'{}'", sym.as_char()))
        }
    }

    pub(crate) fn expect_keyword(&mut self, kw: Keyword) -> Result<(), ParseError> {
        if self.current().keyword() == Some(kw) {
            self.advance();
            Ok(())
        } else {
            self.fail_expected(&format!("'{}'", kw.as_str()))
        }
    }

    pub(crate) fn expect_ident(&mut self) -> Result<String, ParseError> {
        if self.current().kind == TokenKind::Identifier {
            let name = self.current().text.clone();
            self.advance();
            Ok(name)
        } else {
            self.fail_expected("identifier")
        }
    }

    // ========================================================================
    // Errors
    // ========================================================================

    /// Records an error at the current token and returns it.
    pub(crate) fn fail<T>(&mut self, message: impl Into<String>) -> Result<T, ParseError> {
        let tok = self.current();
        let err = ParseError {
            message: message.into(),
            line: tok.line,
            col: tok.col,
            span: tok.span,
        };
        if self.error.is_none() {
            self.error = Some(err.clone());
        }
        Err(err)
    }

    pub(crate) fn fail_expected<T>(&mut self, what: &str) -> Result<T, ParseError> {
        let found = self.current().describe();
        self.fail(format!("expected {what}, found {found}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Direction;
    use crate::lexer::tokenize;
    use mvs_diagnostics::DiagnosticSink;
    use mvs_source::FileId;

    fn parser(source: &str) -> Parser {
        let sink = DiagnosticSink::new();
        Parser::new(tokenize(source, FileId::from_raw(0), &sink).unwrap())
    }

    fn parse_ok(source: &str) -> Module {
        match parser(source).parse_module() {
            Ok(m) => m,
            Err(e) => panic!("unexpected parse error: {e}"),
        }
    }

    fn parse_err(source: &str) -> ParseError {
        parser(source).parse_module().unwrap_err()
    }

    #[test]
    fn empty_port_list() {
        let m = parse_ok("module top(); endmodule");
        assert_eq!(m.name, "top");
        assert!(m.ports.is_empty() && m.wires.is_empty() && m.assigns.is_empty());
    }

    #[test]
    fn semicolon_after_header_is_optional() {
        let m = parse_ok("module top(a) endmodule");
        assert_eq!(m.ports.len(), 1);
    }

    #[test]
    fn counts_match_source() {
        let m = parse_ok(
            "module m(input a, input b, output [3:0] y);
               wire c, d;
               wire [7:0] e;
               assign c = a & b;
               assign d = c | a;
               assign y[1:0] = d;
             endmodule",
        );
        assert_eq!(m.ports.len(), 3);
        assert_eq!(m.wires.len(), 3);
        assert_eq!(m.assigns.len(), 3);
        assert_eq!(m.ports[2].direction, Direction::Output);
        assert_eq!(m.ports[2].width, 4);
        assert_eq!(m.wires[2].width, 8);
    }

    #[test]
    fn module_span_covers_endmodule() {
        let src = "module top(); endmodule";
        let m = parse_ok(src);
        assert_eq!((m.span.start, m.span.end), (0, src.len() as u32));
    }

    #[test]
    fn error_carries_position() {
        let err = parse_err("module top();\n  wire x\nendmodule");
        assert_eq!((err.line, err.col), (3, 1));
        assert_eq!(err.message, "expected ';', found 'endmodule'");
        assert_eq!(err.to_string(), "3:1: expected ';', found 'endmodule'");
    }

    #[test]
    fn missing_module_keyword() {
        let err = parse_err("top(); endmodule");
        assert_eq!(err.message, "expected 'module', found identifier 'top'");
    }

    #[test]
    fn unexpected_body_token() {
        let err = parse_err("module top(); a = b; endmodule");
        assert_eq!(
            err.message,
            "expected 'wire', 'assign' or 'endmodule', found identifier 'a'"
        );
    }

    #[test]
    fn missing_endmodule() {
        let err = parse_err("module top(); wire a;");
        assert!(err.message.ends_with("found end of input"));
    }

    #[test]
    fn first_error_is_kept() {
        let mut p = parser("module (a); endmodule");
        let first = p.parse_module().unwrap_err();
        assert!(!p.is_module_stub_valid());
        assert_eq!(p.error(), Some(&first));
    }

    #[test]
    fn stub_accepts_uninterpreted_body() {
        assert!(parser("module M(a); wire x; assign x = a; endmodule").is_module_stub_valid());
        // Body content is not validated by the stub check.
        assert!(parser("module M(a); ) ) = ; endmodule").is_module_stub_valid());
    }

    #[test]
    fn stub_requires_endmodule() {
        let mut p = parser("module M(a); wire x; assign x = a;");
        assert!(!p.is_module_stub_valid());
        assert!(p.error().is_some_and(|e| e.message.contains("'endmodule'")));
    }

    #[test]
    fn stub_validates_header() {
        assert!(!parser("module M(a,); endmodule").is_module_stub_valid());
        assert!(!parser("module (a); endmodule").is_module_stub_valid());
        assert!(!parser("wire x; endmodule").is_module_stub_valid());
    }

    #[test]
    fn parser_without_end_token() {
        let mut p = Parser::new(Vec::new());
        let err = p.parse_module().unwrap_err();
        assert_eq!(err.message, "expected 'module', found end of input");
    }

    #[test]
    fn diagnostic_from_error() {
        let err = parse_err("module top(; endmodule");
        let diag = err.to_diagnostic();
        assert_eq!(diag.code, E_SYNTAX);
        assert_eq!(diag.primary_span, err.span);
    }
}
