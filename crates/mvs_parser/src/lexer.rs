//! Lexical analyzer for module source text.
//!
//! Converts source text into [`Token`]s terminated by a [`TokenKind::End`]
//! token. Whitespace, `//` line comments and `/* */` block comments are
//! skipped while line and column counters keep advancing. Characters outside
//! the language are reported to the [`DiagnosticSink`] as warnings and
//! dropped. A malformed numeric literal is the only hard failure.

use crate::token::{Keyword, Symbol, Token, TokenKind};
use mvs_common::{parse_number_literal, NumberFormatError};
use mvs_diagnostics::code::{Category, DiagnosticCode};
use mvs_diagnostics::{Diagnostic, DiagnosticSink, Label};
use mvs_source::{FileId, Span};

/// Code for a malformed numeric literal.
pub const E_NUMBER_FORMAT: DiagnosticCode = DiagnosticCode::new(Category::Error, 100);
/// Code for a skipped character that is not part of the language.
pub const W_UNRECOGNIZED_CHAR: DiagnosticCode = DiagnosticCode::new(Category::Warning, 1);
/// Code for a block comment that runs to the end of the input.
pub const W_UNTERMINATED_COMMENT: DiagnosticCode = DiagnosticCode::new(Category::Warning, 3);

/// Tokenizes `source`.
///
/// On a bad numeric literal an `E100` diagnostic pointing at the literal is
/// emitted and the literal's error is returned.
pub fn tokenize(
    source: &str,
    file: FileId,
    sink: &DiagnosticSink,
) -> Result<Vec<Token>, NumberFormatError> {
    let mut lexer = Lexer {
        source,
        bytes: source.as_bytes(),
        pos: 0,
        line: 1,
        line_start: 0,
        file,
        sink,
    };
    lexer.lex_all()
}

struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    line_start: usize,
    file: FileId,
    sink: &'a DiagnosticSink,
}

impl Lexer<'_> {
    fn lex_all(&mut self) -> Result<Vec<Token>, NumberFormatError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_trivia();
            if self.at_end() {
                tokens.push(self.token(TokenKind::End, self.pos, None));
                return Ok(tokens);
            }
            if let Some(tok) = self.next_token()? {
                tokens.push(tok);
            }
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn peek(&self) -> u8 {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    /// Moves past one byte, keeping the line counter in step.
    fn bump(&mut self) {
        if self.peek() == b'\n' {
            self.line += 1;
            self.line_start = self.pos + 1;
        }
        self.pos += 1;
    }

    fn bump_while(&mut self, pred: impl Fn(u8) -> bool) {
        while !self.at_end() && pred(self.peek()) {
            self.bump();
        }
    }

    fn col_of(&self, pos: usize) -> u32 {
        (pos - self.line_start) as u32 + 1
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(self.file, start as u32, self.pos as u32)
    }

    // Tokens never span a newline, so the current line is the token's line.
    fn token(&self, kind: TokenKind, start: usize, value: Option<i64>) -> Token {
        Token {
            kind,
            text: self.source[start..self.pos].to_string(),
            span: self.span_from(start),
            line: self.line,
            col: self.col_of(start),
            value,
        }
    }

    fn skip_trivia(&mut self) {
        loop {
            self.bump_while(|b| b.is_ascii_whitespace());
            match (self.peek(), self.peek_at(1)) {
                (b'/', b'/') => self.bump_while(|b| b != b'\n'),
                (b'/', b'*') => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    fn skip_block_comment(&mut self) {
        let start = self.pos;
        self.bump();
        self.bump();
        loop {
            if self.at_end() {
                self.sink.emit(Diagnostic::warning(
                    W_UNTERMINATED_COMMENT,
                    "unterminated block comment",
                    self.span_from(start),
                ));
                return;
            }
            if self.peek() == b'*' && self.peek_at(1) == b'/' {
                self.bump();
                self.bump();
                return;
            }
            self.bump();
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, NumberFormatError> {
        let start = self.pos;
        let b = self.peek();

        if is_ident_start(b) {
            self.bump_while(is_ident_char);
            let kind = match Keyword::lookup(&self.source[start..self.pos]) {
                Some(kw) => TokenKind::Keyword(kw),
                None => TokenKind::Identifier,
            };
            return Ok(Some(self.token(kind, start, None)));
        }

        if b.is_ascii_digit() || b == b'\'' {
            return self.lex_number(start).map(Some);
        }

        if let Some(sym) = Symbol::from_char(b as char) {
            self.bump();
            return Ok(Some(self.token(TokenKind::Symbol(sym), start, None)));
        }

        self.skip_unrecognized(start);
        Ok(None)
    }

    /// Lexes `[width]['base]digits`. The digit run is taken greedily so that
    /// stray letters end up inside the literal and are rejected by the
    /// literal parser rather than starting a new identifier.
    fn lex_number(&mut self, start: usize) -> Result<Token, NumberFormatError> {
        self.bump_while(|b| b.is_ascii_digit() || b == b'_');
        if self.peek() == b'\'' {
            self.bump();
            if self.peek().is_ascii_alphanumeric() {
                self.bump();
            }
        }
        self.bump_while(is_ident_char);

        let text = &self.source[start..self.pos];
        match parse_number_literal(text) {
            Ok(lit) => Ok(self.token(TokenKind::Number, start, Some(lit.value))),
            Err(err) => {
                let span = self.span_from(start);
                self.sink.emit(
                    Diagnostic::error(E_NUMBER_FORMAT, err.to_string(), span)
                        .with_label(Label::primary(span, "malformed literal")),
                );
                Err(err)
            }
        }
    }

    fn skip_unrecognized(&mut self, start: usize) {
        let ch = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
        for _ in 0..ch.len_utf8() {
            self.bump();
        }
        self.sink.emit(Diagnostic::warning(
            W_UNRECOGNIZED_CHAR,
            format!("unrecognized character {ch:?} skipped"),
            self.span_from(start),
        ));
    }
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

fn is_ident_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
