//! Expression evaluation against a symbol table snapshot.

use crate::error::SimError;
use crate::symbol_table::SymbolTable;
use mvs_common::{BitRange, Value};
use mvs_parser::{BinaryOp, Expr, UnaryOp};

/// Computes the value of `expr`. Never mutates `symbols`.
///
/// Arithmetic wraps on overflow. A sliced identifier `x[msb:lsb]` yields the
/// selected bits shifted down to bit 0.
pub fn evaluate(expr: &Expr, symbols: &SymbolTable) -> Result<Value, SimError> {
    match expr {
        Expr::Const { value, .. } => Ok(*value),
        Expr::Ident { name, bits, .. } => {
            let value = symbols.get(name)?;
            match bits {
                Some(bits) => Ok(checked_slice(name, *bits)?.extract(value)),
                None => Ok(value),
            }
        }
        Expr::Unary {
            op: UnaryOp::BitNot,
            operand,
            ..
        } => Ok(!evaluate(operand, symbols)?),
        Expr::Binary {
            op, left, right, ..
        } => {
            let l = evaluate(left, symbols)?;
            let r = evaluate(right, symbols)?;
            apply_binary(*op, l, r)
        }
    }
}

/// Applies a binary operator to two values.
pub fn apply_binary(op: BinaryOp, l: Value, r: Value) -> Result<Value, SimError> {
    Ok(match op {
        BinaryOp::And => l & r,
        BinaryOp::Or => l | r,
        BinaryOp::Xor => l ^ r,
        BinaryOp::Add => l.wrapping_add(r),
        BinaryOp::Sub => l.wrapping_sub(r),
        BinaryOp::Mul => l.wrapping_mul(r),
        BinaryOp::Div => {
            if r == 0 {
                return Err(SimError::DivisionByZero);
            }
            l.wrapping_div(r)
        }
    })
}

/// Rejects slices that reach past the machine word.
pub(crate) fn checked_slice(name: &str, bits: BitRange) -> Result<BitRange, SimError> {
    if bits.fits_word() {
        Ok(bits)
    } else {
        Err(SimError::SliceOutOfRange {
            name: name.to_string(),
            msb: bits.msb,
            lsb: bits.lsb,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mvs_diagnostics::DiagnosticSink;
    use mvs_source::FileId;

    fn rhs(expr: &str) -> Expr {
        let source = format!("module t(); assign y = {expr}; endmodule");
        let sink = DiagnosticSink::new();
        let mut module = mvs_parser::parse_str(&source, FileId::from_raw(0), &sink).unwrap();
        module.assigns.remove(0).rhs
    }

    fn eval(expr: &str, vars: &[(&str, Value)]) -> Result<Value, SimError> {
        let symbols: SymbolTable = vars.iter().map(|(n, v)| (n.to_string(), *v)).collect();
        evaluate(&rhs(expr), &symbols)
    }

    #[test]
    fn bitwise() {
        let vars = [("a", 0b1100), ("b", 0b1010)];
        assert_eq!(eval("a & b", &vars), Ok(0b1000));
        assert_eq!(eval("a | b", &vars), Ok(0b1110));
        assert_eq!(eval("a ^ b", &vars), Ok(0b0110));
        assert_eq!(eval("~a", &vars), Ok(!0b1100));
    }

    #[test]
    fn arithmetic() {
        let vars = [("a", 7), ("b", 2)];
        assert_eq!(eval("a + b", &vars), Ok(9));
        assert_eq!(eval("a - b", &vars), Ok(5));
        assert_eq!(eval("a * b", &vars), Ok(14));
        assert_eq!(eval("a / b", &vars), Ok(3));
        assert_eq!(eval("b - a", &vars), Ok(-5));
    }

    #[test]
    fn precedence_matches_parenthesized_form() {
        let vars = [("a", 3), ("b", 5), ("c", 6)];
        assert_eq!(eval("a + b & c", &vars), eval("(a + b) & c", &vars));
        assert_eq!(eval("a + b & c", &vars), Ok(0));
    }

    #[test]
    fn arithmetic_wraps() {
        assert_eq!(eval("a + 1", &[("a", Value::MAX)]), Ok(Value::MIN));
        assert_eq!(eval("a / b", &[("a", Value::MIN), ("b", -1)]), Ok(Value::MIN));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(
            eval("a / b", &[("a", 4), ("b", 0)]),
            Err(SimError::DivisionByZero)
        );
        assert_eq!(eval("a / (b - b)", &[("a", 4), ("b", 9)]), Err(SimError::DivisionByZero));
    }

    #[test]
    fn read_slice_narrows_operand() {
        let vars = [("x", 0xA5)];
        assert_eq!(eval("x[7:4]", &vars), Ok(0xA));
        assert_eq!(eval("x[3:0]", &vars), Ok(0x5));
        assert_eq!(eval("x[0]", &vars), Ok(1));
        assert_eq!(eval("x[7:4] + x[3:0]", &vars), Ok(0xF));
    }

    #[test]
    fn read_slice_beyond_word() {
        assert_eq!(
            eval("x[64:60]", &[("x", 1)]),
            Err(SimError::SliceOutOfRange {
                name: "x".into(),
                msb: 64,
                lsb: 60
            })
        );
    }

    #[test]
    fn undefined_symbol() {
        assert_eq!(
            eval("a & q", &[("a", 1)]),
            Err(SimError::UndefinedSymbol { name: "q".into() })
        );
    }

    #[test]
    fn constants() {
        assert_eq!(eval("4'b1010 + 'd2", &[]), Ok(12));
    }
}
