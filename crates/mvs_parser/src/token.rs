//! Token types produced by the [`lexer`](crate::lexer).
//!
//! A [`Token`] keeps its text, byte [`Span`] and 1-indexed line/column.
//! Number tokens additionally carry the parsed literal value.

use mvs_common::Value;
use mvs_source::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reserved words of the module language.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Keyword {
    /// `module`
    Module,
    /// `endmodule`
    EndModule,
    /// `input`
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
    /// `wire`
    Wire,
    /// `assign`
    Assign,
}

impl Keyword {
    /// Looks up a keyword by its exact (case-sensitive) spelling.
    pub fn lookup(text: &str) -> Option<Keyword> {
        Some(match text {
            "module" => Keyword::Module,
            "endmodule" => Keyword::EndModule,
            "input" => Keyword::Input,
            "output" => Keyword::Output,
            "inout" => Keyword::Inout,
            "wire" => Keyword::Wire,
            "assign" => Keyword::Assign,
            _ => return None,
        })
    }

    /// The source spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Module => "module",
            Keyword::EndModule => "endmodule",
            Keyword::Input => "input",
            Keyword::Output => "output",
            Keyword::Inout => "inout",
            Keyword::Wire => "wire",
            Keyword::Assign => "assign",
        }
    }
}

/// Single-character punctuation and operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Symbol {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `=`
    Equals,
    /// `&`
    Amp,
    /// `|`
    Pipe,
    /// `^`
    Caret,
    /// `~`
    Tilde,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `:`
    Colon,
}

impl Symbol {
    /// Maps a character to its symbol, if it is one.
    pub fn from_char(c: char) -> Option<Symbol> {
        Some(match c {
            '(' => Symbol::LParen,
            ')' => Symbol::RParen,
            ',' => Symbol::Comma,
            ';' => Symbol::Semicolon,
            '=' => Symbol::Equals,
            '&' => Symbol::Amp,
            '|' => Symbol::Pipe,
            '^' => Symbol::Caret,
            '~' => Symbol::Tilde,
            '+' => Symbol::Plus,
            '-' => Symbol::Minus,
            '*' => Symbol::Star,
            '/' => Symbol::Slash,
            '[' => Symbol::LBracket,
            ']' => Symbol::RBracket,
            ':' => Symbol::Colon,
            _ => return None,
        })
    }

    /// The character this symbol is spelled with.
    pub fn as_char(self) -> char {
        match self {
            Symbol::LParen => '(',
            Symbol::RParen => ')',
            Symbol::Comma => ',',
            Symbol::Semicolon => ';',
            Symbol::Equals => '=',
            Symbol::Amp => '&',
            Symbol::Pipe => '|',
            Symbol::Caret => '^',
            Symbol::Tilde => '~',
            Symbol::Plus => '+',
            Symbol::Minus => '-',
            Symbol::Star => '*',
            Symbol::Slash => '/',
            Symbol::LBracket => '[',
            Symbol::RBracket => ']',
            Symbol::Colon => ':',
        }
    }
}

/// The class of a token.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum TokenKind {
    /// A name that is not a keyword.
    Identifier,
    /// A numeric literal; [`Token::value`] holds its value.
    Number,
    /// A reserved word.
    Keyword(Keyword),
    /// Punctuation or an operator.
    Symbol(Symbol),
    /// End of input. Always the last token.
    End,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Keyword(kw) => write!(f, "'{}'", kw.as_str()),
            TokenKind::Symbol(sym) => write!(f, "'{}'", sym.as_char()),
            TokenKind::End => write!(f, "end of input"),
        }
    }
}

/// One lexical unit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// The exact source text (empty for [`TokenKind::End`]).
    pub text: String,
    /// Byte range in the source.
    pub span: Span,
    /// 1-indexed line of the first character.
    pub line: u32,
    /// 1-indexed column (in bytes) of the first character.
    pub col: u32,
    /// Parsed value of a number token.
    pub value: Option<Value>,
}

impl Token {
    /// Returns the keyword if this is a keyword token.
    pub fn keyword(&self) -> Option<Keyword> {
        match self.kind {
            TokenKind::Keyword(kw) => Some(kw),
            _ => None,
        }
    }

    /// Returns `true` if this is the given symbol.
    pub fn is_symbol(&self, sym: Symbol) -> bool {
        self.kind == TokenKind::Symbol(sym)
    }

    /// Short description used in parser messages, e.g. `identifier 'a'`.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number => format!("{} '{}'", self.kind, self.text),
            _ => self.kind.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_lookup_is_case_sensitive() {
        assert_eq!(Keyword::lookup("endmodule"), Some(Keyword::EndModule));
        assert_eq!(Keyword::lookup("Module"), None);
        assert_eq!(Keyword::lookup("reg"), None);
    }

    #[test]
    fn keyword_spelling_roundtrip() {
        for kw in [
            Keyword::Module,
            Keyword::EndModule,
            Keyword::Input,
            Keyword::Output,
            Keyword::Inout,
            Keyword::Wire,
            Keyword::Assign,
        ] {
            assert_eq!(Keyword::lookup(kw.as_str()), Some(kw));
        }
    }

    #[test]
    fn symbol_set() {
        for c in "(),;=&|^~+-*/[]:".chars() {
            let sym = Symbol::from_char(c).unwrap();
            assert_eq!(sym.as_char(), c);
        }
        assert_eq!(Symbol::from_char('$'), None);
        assert_eq!(Symbol::from_char('\''), None);
    }

    #[test]
    fn describe() {
        let tok = Token {
            kind: TokenKind::Identifier,
            text: "clk".into(),
            span: Span::DUMMY,
            line: 1,
            col: 1,
            value: None,
        };
        assert_eq!(tok.describe(), "identifier 'clk'");
        assert_eq!(TokenKind::Symbol(Symbol::Semicolon).to_string(), "';'");
        assert_eq!(TokenKind::Keyword(Keyword::Wire).to_string(), "'wire'");
    }
}
