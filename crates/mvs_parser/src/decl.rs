//! Declarations: the port list, `wire` and `assign` statements, bit ranges.

use crate::ast::{Assign, Direction, Port, Wire};
use crate::parser::{ParseError, Parser};
use crate::token::{Keyword, Symbol, TokenKind};
use mvs_common::BitRange;
use mvs_source::Span;

/// Largest bit index accepted in a range.
pub const MAX_BIT_INDEX: u32 = u16::MAX as u32;

impl Parser {
    /// `( )` or `( port {, port} )` where `port := [direction] [range] ident`.
    pub(crate) fn parse_port_list(&mut self) -> Result<Vec<Port>, ParseError> {
        self.expect_symbol(Symbol::LParen)?;
        let mut ports = Vec::new();
        if self.eat_symbol(Symbol::RParen) {
            return Ok(ports);
        }
        loop {
            ports.push(self.parse_port()?);
            if !self.eat_symbol(Symbol::Comma) {
                break;
            }
        }
        self.expect_symbol(Symbol::RParen)?;
        Ok(ports)
    }

    fn parse_port(&mut self) -> Result<Port, ParseError> {
        let start = self.current().span;
        let direction = match self.current().keyword() {
            Some(Keyword::Input) => Some(Direction::Input),
            Some(Keyword::Output) => Some(Direction::Output),
            Some(Keyword::Inout) => Some(Direction::Inout),
            _ => None,
        };
        if direction.is_some() {
            self.advance();
        }
        let direction = direction.unwrap_or_default();
        let width = self.parse_optional_width()?;
        let name = self.expect_ident()?;
        Ok(Port {
            direction,
            name,
            width,
            span: start.to(self.prev_span()),
        })
    }

    /// `wire [range] ident {, ident} ;`; every name shares the width.
    pub(crate) fn parse_wire_decl(&mut self) -> Result<Vec<Wire>, ParseError> {
        self.expect_keyword(Keyword::Wire)?;
        let width = self.parse_optional_width()?;
        let mut wires = Vec::new();
        loop {
            let span = self.current().span;
            let name = self.expect_ident()?;
            wires.push(Wire { name, width, span });
            if !self.eat_symbol(Symbol::Comma) {
                break;
            }
        }
        self.expect_symbol(Symbol::Semicolon)?;
        Ok(wires)
    }

    /// `assign ident [range] = expr ;`
    pub(crate) fn parse_assign(&mut self) -> Result<Assign, ParseError> {
        let start = self.current().span;
        self.expect_keyword(Keyword::Assign)?;
        let target = self.expect_ident()?;
        let target_bits = if self.at_symbol(Symbol::LBracket) {
            Some(self.parse_range()?.0)
        } else {
            None
        };
        self.expect_symbol(Symbol::Equals)?;
        let rhs = self.parse_expr()?;
        let end = self.expect_symbol(Symbol::Semicolon)?;
        Ok(Assign {
            target,
            target_bits,
            rhs,
            span: start.to(end),
        })
    }

    fn parse_optional_width(&mut self) -> Result<u32, ParseError> {
        if self.at_symbol(Symbol::LBracket) {
            Ok(self.parse_range()?.0.width())
        } else {
            Ok(1)
        }
    }

    /// `[msb:lsb]` or `[bit]`. Returns the range and its span.
    pub(crate) fn parse_range(&mut self) -> Result<(BitRange, Span), ParseError> {
        let start = self.expect_symbol(Symbol::LBracket)?;
        let msb = self.parse_bit_index()?;
        let lsb = if self.eat_symbol(Symbol::Colon) {
            self.parse_bit_index()?
        } else {
            msb
        };
        if msb < lsb {
            return self.fail(format!(
                "bit range [{msb}:{lsb}] has its most significant bit below its least significant bit"
            ));
        }
        let end = self.expect_symbol(Symbol::RBracket)?;
        Ok((BitRange::new(msb, lsb), start.to(end)))
    }

    fn parse_bit_index(&mut self) -> Result<u32, ParseError> {
        let tok = self.current();
        if tok.kind != TokenKind::Number {
            return self.fail_expected("bit index");
        }
        match tok.value.and_then(|v| u32::try_from(v).ok()) {
            Some(index) if index <= MAX_BIT_INDEX => {
                self.advance();
                Ok(index)
            }
            _ => {
                let text = tok.text.clone();
                self.fail(format!("bit index {text} is out of range"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::Module;
    use crate::lexer::tokenize;
    use mvs_diagnostics::DiagnosticSink;
    use mvs_source::FileId;

    fn parse(source: &str) -> Result<Module, ParseError> {
        let sink = DiagnosticSink::new();
        let tokens = tokenize(source, FileId::from_raw(0), &sink).unwrap();
        Parser::new(tokens).parse_module()
    }

    #[test]
    fn port_direction_defaults_to_input() {
        let m = parse("module m(a, output b, inout [1:0] c); endmodule").unwrap();
        let dirs: Vec<_> = m.ports.iter().map(|p| p.direction).collect();
        assert_eq!(dirs, [Direction::Input, Direction::Output, Direction::Inout]);
        assert_eq!(m.ports[0].width, 1);
        assert_eq!(m.ports[2].width, 2);
    }

    #[test]
    fn trailing_comma_rejected() {
        let err = parse("module m(a, b,); endmodule").unwrap_err();
        assert_eq!(err.message, "expected identifier, found ')'");
    }

    #[test]
    fn wire_list_shares_width() {
        let m = parse("module m(); wire [15:8] hi, lo; endmodule").unwrap();
        assert_eq!(m.wires.len(), 2);
        assert!(m.wires.iter().all(|w| w.width == 8));
        assert_eq!(m.wires[1].name, "lo");
    }

    #[test]
    fn single_bit_range() {
        let m = parse("module m(); wire [5] w; assign w[0] = 1; endmodule").unwrap();
        assert_eq!(m.wires[0].width, 1);
        assert_eq!(m.assigns[0].target_bits, Some(BitRange::bit(0)));
    }

    #[test]
    fn assign_with_slice_target() {
        let m = parse("module m(output [7:0] y); assign y[3:0] = 4'h0; endmodule").unwrap();
        let a = &m.assigns[0];
        assert_eq!(a.target, "y");
        assert_eq!(a.target_bits, Some(BitRange::new(3, 0)));
    }

    #[test]
    fn reversed_range_rejected() {
        let err = parse("module m(); wire [0:7] w; endmodule").unwrap_err();
        assert!(err.message.contains("[0:7]"));
        assert_eq!(err.col, 22);
    }

    #[test]
    fn range_index_must_be_number() {
        let err = parse("module m(); wire [n:0] w; endmodule").unwrap_err();
        assert_eq!(err.message, "expected bit index, found identifier 'n'");
    }

    #[test]
    fn huge_index_rejected() {
        let err = parse("module m(); wire [99999:0] w; endmodule").unwrap_err();
        assert_eq!(err.message, "bit index 99999 is out of range");
    }

    #[test]
    fn assign_requires_equals_and_semicolon() {
        assert_eq!(
            parse("module m(); assign y a; endmodule").unwrap_err().message,
            "expected '=', found identifier 'a'"
        );
        assert_eq!(
            parse("module m(); assign y = a endmodule").unwrap_err().message,
            "expected ';', found 'endmodule'"
        );
    }
}
