//! Numeric literal parsing: plain decimal, sized based, and unsized based forms.
//!
//! Accepted shapes are `42`, `4'b1010`, `8'hFF`, `16'd99` and `'b1`. Digits may
//! contain `_` separators and base characters are case-insensitive. The
//! declared width is recorded but does not narrow the value.

use crate::bits::Value;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The radix selected by a literal's base character.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Radix {
    /// `'b`
    Binary,
    /// `'d`, or no base marker at all.
    Decimal,
    /// `'h`
    Hex,
}

impl Radix {
    /// Maps a base character (case-insensitive) to its radix.
    pub fn from_char(c: char) -> Option<Radix> {
        match c.to_ascii_lowercase() {
            'b' => Some(Radix::Binary),
            'd' => Some(Radix::Decimal),
            'h' => Some(Radix::Hex),
            _ => None,
        }
    }

    /// Returns the numeric base.
    pub fn base(self) -> u32 {
        match self {
            Radix::Binary => 2,
            Radix::Decimal => 10,
            Radix::Hex => 16,
        }
    }
}

impl fmt::Display for Radix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Radix::Binary => write!(f, "binary"),
            Radix::Decimal => write!(f, "decimal"),
            Radix::Hex => write!(f, "hexadecimal"),
        }
    }
}

/// Errors produced while interpreting the text of a numeric literal.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NumberFormatError {
    /// A `'` was not followed by a base character.
    #[error("missing base character after ' in number literal \"{literal}\"")]
    MissingBase {
        /// The literal text.
        literal: String,
    },

    /// The base character is not one of `b`, `d`, `h`.
    #[error("invalid base character '{base}' in number literal \"{literal}\"")]
    InvalidBase {
        /// The offending base character.
        base: char,
        /// The literal text.
        literal: String,
    },

    /// No value digits remain after the base marker.
    #[error("missing value digits in number literal \"{literal}\"")]
    MissingDigits {
        /// The literal text.
        literal: String,
    },

    /// A digit is not valid in the literal's radix.
    #[error("invalid {radix} digit '{digit}' in number literal \"{literal}\"")]
    InvalidDigit {
        /// The offending digit.
        digit: char,
        /// The radix in effect.
        radix: Radix,
        /// The literal text.
        literal: String,
    },

    /// The value does not fit in the machine word.
    #[error("number literal \"{literal}\" does not fit in 64 bits")]
    Overflow {
        /// The literal text.
        literal: String,
    },

    /// The declared width prefix is zero or not a valid integer.
    #[error("invalid width in number literal \"{literal}\"")]
    InvalidWidth {
        /// The literal text.
        literal: String,
    },
}

/// A parsed numeric literal.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct NumberLiteral {
    /// The declared width (`4` in `4'b1010`), if present.
    pub width: Option<u32>,
    /// The radix of the digits.
    pub radix: Radix,
    /// The integer value. Values with bit 63 set wrap to negative.
    pub value: Value,
}

/// Parses the text of a numeric literal.
pub fn parse_number_literal(text: &str) -> Result<NumberLiteral, NumberFormatError> {
    let literal = || text.to_string();

    let (width_text, rest) = match text.find('\'') {
        Some(tick) => (&text[..tick], Some(&text[tick + 1..])),
        None => (text, None),
    };

    let Some(based) = rest else {
        // Plain decimal: the whole text is the value.
        let value = parse_digits(text, Radix::Decimal, text)?;
        return Ok(NumberLiteral {
            width: None,
            radix: Radix::Decimal,
            value,
        });
    };

    let width = parse_width(width_text, text)?;

    let mut chars = based.chars();
    let base_char = chars
        .next()
        .ok_or_else(|| NumberFormatError::MissingBase { literal: literal() })?;
    let radix = Radix::from_char(base_char).ok_or_else(|| NumberFormatError::InvalidBase {
        base: base_char,
        literal: literal(),
    })?;

    let value = parse_digits(chars.as_str(), radix, text)?;
    Ok(NumberLiteral {
        width,
        radix,
        value,
    })
}

impl FromStr for NumberLiteral {
    type Err = NumberFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_number_literal(s.trim())
    }
}

fn parse_width(width_text: &str, literal: &str) -> Result<Option<u32>, NumberFormatError> {
    let digits: String = width_text.chars().filter(|&c| c != '_').collect();
    if digits.is_empty() {
        return Ok(None);
    }
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => Err(NumberFormatError::InvalidWidth {
            literal: literal.to_string(),
        }),
        Ok(w) => Ok(Some(w)),
    }
}

fn parse_digits(digits: &str, radix: Radix, literal: &str) -> Result<Value, NumberFormatError> {
    let mut acc: u64 = 0;
    let mut seen_digit = false;
    for c in digits.chars() {
        if c == '_' {
            continue;
        }
        let d = c
            .to_digit(radix.base())
            .ok_or_else(|| NumberFormatError::InvalidDigit {
                digit: c,
                radix,
                literal: literal.to_string(),
            })?;
        acc = acc
            .checked_mul(u64::from(radix.base()))
            .and_then(|v| v.checked_add(u64::from(d)))
            .ok_or_else(|| NumberFormatError::Overflow {
                literal: literal.to_string(),
            })?;
        seen_digit = true;
    }
    if !seen_digit {
        return Err(NumberFormatError::MissingDigits {
            literal: literal.to_string(),
        });
    }
    Ok(acc as Value)
}
