//! Expression parsing by precedence climbing.
//!
//! | precedence | operators |
//! |------------|-----------|
//! | 5          | `^`       |
//! | 4          | `*` `/`   |
//! | 3          | `+` `-`   |
//! | 2          | `&`       |
//! | 1          | `\|`      |
//!
//! All binary operators are left-associative. Prefix `~` binds tighter than
//! any binary operator.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::parser::{ParseError, Parser};
use crate::token::{Symbol, TokenKind};

/// Deepest nesting of parentheses and `~` accepted in one expression.
pub const MAX_EXPR_DEPTH: usize = 128;

fn binary_op(sym: Symbol) -> Option<BinaryOp> {
    Some(match sym {
        Symbol::Pipe => BinaryOp::Or,
        Symbol::Amp => BinaryOp::And,
        Symbol::Plus => BinaryOp::Add,
        Symbol::Minus => BinaryOp::Sub,
        Symbol::Star => BinaryOp::Mul,
        Symbol::Slash => BinaryOp::Div,
        Symbol::Caret => BinaryOp::Xor,
        _ => return None,
    })
}

impl Parser {
    /// Parses a full expression.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary(1)
    }

    fn current_binary_op(&self) -> Option<BinaryOp> {
        match self.current().kind {
            TokenKind::Symbol(sym) => binary_op(sym),
            _ => None,
        }
    }

    fn parse_binary(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_unary()?;
        while let Some(op) = self.current_binary_op() {
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let rhs = self.parse_binary(prec + 1)?;
            let span = lhs.span().to(rhs.span());
            lhs = Expr::Binary {
                op,
                left: Box::new(lhs),
                right: Box::new(rhs),
                span,
            };
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        if self.depth >= MAX_EXPR_DEPTH {
            return self.fail("expression nested too deeply");
        }
        self.depth += 1;
        let expr = self.parse_prefixed();
        self.depth -= 1;
        expr
    }

    fn parse_prefixed(&mut self) -> Result<Expr, ParseError> {
        if self.at_symbol(Symbol::Tilde) {
            let start = self.current().span;
            self.advance();
            let operand = self.parse_unary()?;
            let span = start.to(operand.span());
            return Ok(Expr::Unary {
                op: UnaryOp::BitNot,
                operand: Box::new(operand),
                span,
            });
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let tok = self.current();
        let (kind, span) = (tok.kind, tok.span);
        match kind {
            TokenKind::Identifier => {
                let name = tok.text.clone();
                self.advance();
                if self.at_symbol(Symbol::LBracket) {
                    let (bits, range_span) = self.parse_range()?;
                    return Ok(Expr::Ident {
                        name,
                        bits: Some(bits),
                        span: span.to(range_span),
                    });
                }
                Ok(Expr::Ident {
                    name,
                    bits: None,
                    span,
                })
            }
            TokenKind::Number => {
                let value = tok.value.unwrap_or_default();
                self.advance();
                Ok(Expr::Const { value, span })
            }
            TokenKind::Symbol(Symbol::LParen) => {
                self.advance();
                let inner = self.parse_expr()?;
                self.expect_symbol(Symbol::RParen)?;
                Ok(inner)
            }
            _ => self.fail_expected("expression"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use mvs_common::BitRange;
    use mvs_diagnostics::DiagnosticSink;
    use mvs_source::FileId;

    fn parse(source: &str) -> Result<Expr, ParseError> {
        let sink = DiagnosticSink::new();
        let tokens = tokenize(source, FileId::from_raw(0), &sink).unwrap();
        let mut p = Parser::new(tokens);
        let expr = p.parse_expr()?;
        assert!(p.at_end(), "trailing input after expression");
        Ok(expr)
    }

    fn shape(source: &str) -> String {
        parse(source).unwrap().to_string()
    }

    #[test]
    fn add_binds_tighter_than_and() {
        assert_eq!(shape("a + b & c"), "((a + b) & c)");
        assert_eq!(shape("a & b + c"), "(a & (b + c))");
    }

    #[test]
    fn full_precedence_ladder() {
        assert_eq!(shape("a | b & c + d * e ^ f"), "(a | (b & (c + (d * (e ^ f)))))");
        assert_eq!(shape("a ^ b * c + d & e | f"), "(((((a ^ b) * c) + d) & e) | f)");
    }

    #[test]
    fn xor_binds_tighter_than_mul() {
        assert_eq!(shape("a * b ^ c"), "(a * (b ^ c))");
    }

    #[test]
    fn left_associative() {
        assert_eq!(shape("a - b - c"), "((a - b) - c)");
        assert_eq!(shape("a / b * c"), "((a / b) * c)");
        assert_eq!(shape("a - b + c"), "((a - b) + c)");
    }

    #[test]
    fn unary_binds_tightest() {
        assert_eq!(shape("~a & b"), "(~a & b)");
        assert_eq!(shape("~~a"), "~~a");
        assert_eq!(shape("~(a | b)"), "~(a | b)");
    }

    #[test]
    fn parentheses_override() {
        assert_eq!(shape("(a | b) & c"), "((a | b) & c)");
    }

    #[test]
    fn read_slice_and_constant() {
        match parse("x[7:4]").unwrap() {
            Expr::Ident { name, bits, span } => {
                assert_eq!(name, "x");
                assert_eq!(bits, Some(BitRange::new(7, 4)));
                assert_eq!((span.start, span.end), (0, 6));
            }
            other => panic!("expected identifier, got {other:?}"),
        }
        assert!(matches!(
            parse("8'hFF").unwrap(),
            Expr::Const { value: 255, .. }
        ));
    }

    #[test]
    fn binary_span_covers_operands() {
        let e = parse("a  +  bc").unwrap();
        assert_eq!((e.span().start, e.span().end), (0, 8));
    }

    #[test]
    fn missing_operand() {
        let err = parse("a +").unwrap_err();
        assert_eq!(err.message, "expected expression, found end of input");
    }

    #[test]
    fn unclosed_paren() {
        let err = parse("(a & b").unwrap_err();
        assert_eq!(err.message, "expected ')', found end of input");
    }

    #[test]
    fn deep_parentheses_are_rejected() {
        let depth = 200_000;
        let source = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
    }

    #[test]
    fn deep_complement_chain_is_rejected() {
        let source = format!("{}a", "~".repeat(100_000));
        let err = parse(&source).unwrap_err();
        assert_eq!(err.message, "expression nested too deeply");
    }

    #[test]
    fn nesting_below_limit_parses() {
        let depth = MAX_EXPR_DEPTH - 1;
        let source = format!("{}a{}", "(".repeat(depth), ")".repeat(depth));
        assert_eq!(shape(&source), "a");
    }

    #[test]
    fn unary_minus_is_not_an_operator() {
        let err = parse("-a").unwrap_err();
        assert_eq!(err.message, "expected expression, found '-'");
    }
}
