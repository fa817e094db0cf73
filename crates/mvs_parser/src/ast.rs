//! Syntax tree for a single module.
//!
//! Expression trees are immutable once built; every node owns its children.
//! Ports, wires and assignments keep source order so that later stages can
//! walk them deterministically.

use mvs_common::bits::slices_overlap;
use mvs_common::{BitRange, Value};
use mvs_source::Span;
use serde::{Deserialize, Serialize};
use std::fmt::{self, Write as _};

/// Unary operators.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `~` bitwise complement.
    BitNot,
}

/// Binary operators, listed from loosest to tightest binding.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `|`
    Or,
    /// `&`
    And,
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `^`
    Xor,
}

impl BinaryOp {
    /// Binding strength: `^` 5, `*` `/` 4, `+` `-` 3, `&` 2, `|` 1.
    ///
    /// This ordering is part of the language and differs from Verilog's.
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Xor => 5,
            BinaryOp::Mul | BinaryOp::Div => 4,
            BinaryOp::Add | BinaryOp::Sub => 3,
            BinaryOp::And => 2,
            BinaryOp::Or => 1,
        }
    }

    /// The operator's spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::Or => "|",
            BinaryOp::And => "&",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Xor => "^",
        }
    }
}

/// An expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Expr {
    /// A signal read, optionally narrowed to `name[msb:lsb]`.
    Ident {
        /// Signal name.
        name: String,
        /// Read slice, if any.
        bits: Option<BitRange>,
        /// Source span.
        span: Span,
    },
    /// A numeric literal.
    Const {
        /// Literal value.
        value: Value,
        /// Source span.
        span: Span,
    },
    /// A prefix operator application.
    Unary {
        /// The operator.
        op: UnaryOp,
        /// The operand.
        operand: Box<Expr>,
        /// Source span.
        span: Span,
    },
    /// An infix operator application.
    Binary {
        /// The operator.
        op: BinaryOp,
        /// Left operand.
        left: Box<Expr>,
        /// Right operand.
        right: Box<Expr>,
        /// Source span.
        span: Span,
    },
}

impl Expr {
    /// Returns the source span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Ident { span, .. }
            | Expr::Const { span, .. }
            | Expr::Unary { span, .. }
            | Expr::Binary { span, .. } => *span,
        }
    }

    /// Renders the expression as an indented tree, one node per line:
    ///
    /// ```text
    /// |-- BINARY (&)
    ///     |-- IDENTIFIER (a)
    ///     |-- CONSTANT (1)
    /// ```
    pub fn tree(&self) -> String {
        let mut out = String::new();
        self.write_tree(&mut out, 0);
        out
    }

    fn write_tree(&self, out: &mut String, depth: usize) {
        let indent = " ".repeat(depth * 4);
        match self {
            Expr::Ident { name, bits, .. } => {
                let bits = bits.map(|b| b.to_string()).unwrap_or_default();
                let _ = writeln!(out, "{indent}|-- IDENTIFIER ({name}{bits})");
            }
            Expr::Const { value, .. } => {
                let _ = writeln!(out, "{indent}|-- CONSTANT ({value})");
            }
            Expr::Unary {
                op: UnaryOp::BitNot,
                operand,
                ..
            } => {
                let _ = writeln!(out, "{indent}|-- UNARY (~)");
                operand.write_tree(out, depth + 1);
            }
            Expr::Binary {
                op, left, right, ..
            } => {
                let _ = writeln!(out, "{indent}|-- BINARY ({})", op.as_str());
                left.write_tree(out, depth + 1);
                right.write_tree(out, depth + 1);
            }
        }
    }
}

/// Prints the expression fully parenthesized, e.g. `((a + b) & c)`.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Ident {
                name,
                bits: Some(bits),
                ..
            } => write!(f, "{name}{bits}"),
            Expr::Ident { name, .. } => write!(f, "{name}"),
            Expr::Const { value, .. } => write!(f, "{value}"),
            Expr::Unary {
                op: UnaryOp::BitNot,
                operand,
                ..
            } => write!(f, "~{operand}"),
            Expr::Binary {
                op, left, right, ..
            } => write!(f, "({left} {} {right})", op.as_str()),
        }
    }
}

/// Port direction.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Direction {
    /// `input`, also assumed when no direction is written.
    #[default]
    Input,
    /// `output`
    Output,
    /// `inout`
    Inout,
}

impl Direction {
    /// Returns `true` for directions the caller may drive (`input`, `inout`).
    pub fn is_drivable(self) -> bool {
        matches!(self, Direction::Input | Direction::Inout)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Direction::Input => "input",
            Direction::Output => "output",
            Direction::Inout => "inout",
        })
    }
}

/// A port in the module header.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    /// Direction.
    pub direction: Direction,
    /// Name.
    pub name: String,
    /// Width in bits; 1 unless declared with a range.
    pub width: u32,
    /// Source span.
    pub span: Span,
}

/// A `wire` declaration. A multi-name declaration produces one per name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wire {
    /// Name.
    pub name: String,
    /// Width in bits; 1 unless declared with a range.
    pub width: u32,
    /// Source span of the name.
    pub span: Span,
}

/// A continuous assignment `assign target[bits] = rhs;`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assign {
    /// Driven signal.
    pub target: String,
    /// Written slice, or `None` for the whole signal.
    pub target_bits: Option<BitRange>,
    /// Right-hand side.
    pub rhs: Expr,
    /// Source span of the statement.
    pub span: Span,
}

/// A parsed module.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    /// Module name.
    pub name: String,
    /// Ports in header order.
    pub ports: Vec<Port>,
    /// Wires in declaration order.
    pub wires: Vec<Wire>,
    /// Assignments in source order.
    pub assigns: Vec<Assign>,
    /// Source span from `module` to `endmodule`.
    pub span: Span,
}

impl Module {
    /// Ports the caller drives (`input` and `inout`).
    pub fn inputs(&self) -> impl Iterator<Item = &Port> + '_ {
        self.ports.iter().filter(|p| p.direction.is_drivable())
    }

    /// Ports the module drives (`output` and `inout`).
    pub fn outputs(&self) -> impl Iterator<Item = &Port> + '_ {
        self.ports
            .iter()
            .filter(|p| matches!(p.direction, Direction::Output | Direction::Inout))
    }

    /// Looks up a port; when a name is repeated the last port wins.
    pub fn port(&self, name: &str) -> Option<&Port> {
        self.ports.iter().rev().find(|p| p.name == name)
    }

    /// Looks up a wire; when a name is repeated the last wire wins.
    pub fn wire(&self, name: &str) -> Option<&Wire> {
        self.wires.iter().rev().find(|w| w.name == name)
    }

    /// Declared width of `name`, or `None` if it has no declaration.
    ///
    /// Wires are declared after the header, so a wire redeclaring a port
    /// decides the width.
    pub fn declared_width(&self, name: &str) -> Option<u32> {
        self.wire(name)
            .map(|w| w.width)
            .or_else(|| self.port(name).map(|p| p.width))
    }

    /// Pairs `(earlier, later)` of assignment indices that write overlapping
    /// bits of the same target. The final value of such a target depends on
    /// the order the assignments run in.
    pub fn overlapping_drivers(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (later, b) in self.assigns.iter().enumerate() {
            for (earlier, a) in self.assigns[..later].iter().enumerate() {
                if a.target == b.target && slices_overlap(a.target_bits, b.target_bits) {
                    pairs.push((earlier, later));
                }
            }
        }
        pairs
    }
}
