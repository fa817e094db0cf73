//! The simulator's machine word and inclusive bit ranges over it.
//!
//! Signal values are plain two's-complement machine integers ([`Value`]).
//! Declared widths narrow them through masking; [`BitRange`] selects an
//! inclusive `[msb:lsb]` window for slice reads and slice writes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A signal value: the full machine word, not restricted to 0/1.
pub type Value = i64;

/// Number of bits in a [`Value`].
pub const WORD_BITS: u32 = Value::BITS;

/// Width assumed for any identifier that has no port or wire declaration.
pub const DEFAULT_WIDTH: u32 = 32;

/// Returns a mask with the low `width` bits set.
///
/// Widths at or beyond [`WORD_BITS`] yield an all-ones mask.
pub fn mask(width: u32) -> Value {
    if width >= WORD_BITS {
        -1
    } else {
        ((1u64 << width) - 1) as Value
    }
}

/// Truncates `value` to `width` bits. Widths at or beyond the word are a no-op.
pub fn truncate(value: Value, width: u32) -> Value {
    if width >= WORD_BITS {
        value
    } else {
        value & mask(width)
    }
}

/// An inclusive bit range `[msb:lsb]`; `msb == lsb` selects a single bit.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct BitRange {
    /// Most significant bit (inclusive).
    pub msb: u32,
    /// Least significant bit (inclusive).
    pub lsb: u32,
}

impl BitRange {
    /// Creates a range from `msb` down to `lsb`.
    pub fn new(msb: u32, lsb: u32) -> Self {
        Self { msb, lsb }
    }

    /// Creates a single-bit range.
    pub fn bit(index: u32) -> Self {
        Self {
            msb: index,
            lsb: index,
        }
    }

    /// Returns the number of bits covered. Assumes `msb >= lsb`.
    pub fn width(self) -> u32 {
        self.msb - self.lsb + 1
    }

    /// Returns `true` if the range is well ordered and lies inside the machine word.
    pub fn fits_word(self) -> bool {
        self.msb >= self.lsb && self.msb < WORD_BITS
    }

    /// Returns `true` if the two ranges share at least one bit.
    pub fn overlaps(self, other: BitRange) -> bool {
        self.lsb <= other.msb && other.lsb <= self.msb
    }

    /// Extracts the selected bits of `value`, shifted down to bit 0.
    ///
    /// The caller must ensure [`fits_word`](Self::fits_word).
    pub fn extract(self, value: Value) -> Value {
        (value >> self.lsb) & mask(self.width())
    }

    /// Replaces the selected bits of `target` with the low bits of `value`.
    ///
    /// Bits of `target` outside the range are preserved. The caller must
    /// ensure [`fits_word`](Self::fits_word).
    pub fn insert(self, target: Value, value: Value) -> Value {
        let field = mask(self.width());
        (target & !(field << self.lsb)) | ((value & field) << self.lsb)
    }
}

/// Overlap test for optional slices, where `None` is the whole signal and
/// overlaps everything.
pub fn slices_overlap(a: Option<BitRange>, b: Option<BitRange>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.overlaps(b),
        _ => true,
    }
}

impl fmt::Display for BitRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.msb == self.lsb {
            write!(f, "[{}]", self.msb)
        } else {
            write!(f, "[{}:{}]", self.msb, self.lsb)
        }
    }
}
