//! Diagnostic codes such as `E101` or `W001`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which stage a code belongs to; decides the prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Front-end errors (`E`).
    Error,
    /// Front-end warnings (`W`).
    Warning,
    /// Simulation failures (`S`).
    Simulation,
}

impl Category {
    /// Prefix letter used when displaying a code.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
            Category::Simulation => 'S',
        }
    }
}

/// A category plus a number, displayed as `E101`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The stage.
    pub category: Category,
    /// The number within that stage.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_pads_to_three_digits() {
        assert_eq!(DiagnosticCode::new(Category::Warning, 1).to_string(), "W001");
        assert_eq!(DiagnosticCode::new(Category::Error, 101).to_string(), "E101");
        assert_eq!(
            DiagnosticCode::new(Category::Simulation, 12).to_string(),
            "S012"
        );
    }

    #[test]
    fn serde_roundtrip() {
        let code = DiagnosticCode::new(Category::Error, 104);
        let json = serde_json::to_string(&code).unwrap();
        let back: DiagnosticCode = serde_json::from_str(&json).unwrap();
        assert_eq!(code, back);
    }
}
