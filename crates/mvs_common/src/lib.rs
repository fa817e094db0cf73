//! Shared foundational types used across the mvs toolchain.
//!
//! This crate provides the simulator's machine word, the default-width policy,
//! inclusive bit ranges with mask/extract/insert helpers, and numeric literal
//! parsing shared by the lexer and the configuration loader.

#![warn(missing_docs)]

pub mod bits;
pub mod number;

pub use bits::{BitRange, Value, DEFAULT_WIDTH, WORD_BITS};
pub use number::{parse_number_literal, NumberFormatError, NumberLiteral, Radix};
