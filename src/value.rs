//! The binary value type
//!
//! Every variable, function result and literal in the language is a [`Bit`].
//! The standard bitwise operator traits are implemented so the operator table
//! in [`crate::expression::BinaryOp::apply`] reads like the truth tables it encodes.

use std::fmt;
use std::ops::{BitAnd, BitOr, BitXor, Not};

/// A two-state value, `0` or `1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Bit {
    /// Logical false
    #[default]
    Zero,
    /// Logical true
    One,
}

impl Bit {
    /// Parse a single `0` or `1` character
    pub fn from_char(c: char) -> Option<Bit> {
        match c {
            '0' => Some(Bit::Zero),
            '1' => Some(Bit::One),
            _ => None,
        }
    }

    /// The character this bit is written as
    pub fn as_char(self) -> char {
        match self {
            Bit::Zero => '0',
            Bit::One => '1',
        }
    }

    pub fn is_one(self) -> bool {
        self == Bit::One
    }

    /// Split `index` into `width` bits, most significant first
    ///
    /// This is the enumeration order used by truth tables: index `0b01` over
    /// two variables yields `[Zero, One]`.
    pub fn pattern(index: usize, width: usize) -> Vec<Bit> {
        (0..width)
            .rev()
            .map(|shift| Bit::from((index >> shift) & 1 == 1))
            .collect()
    }

    /// Inverse of [`Bit::pattern`]
    pub fn index_of(bits: &[Bit]) -> usize {
        bits.iter()
            .fold(0, |acc, bit| (acc << 1) | usize::from(bit.is_one()))
    }
}

impl From<bool> for Bit {
    fn from(value: bool) -> Self {
        if value {
            Bit::One
        } else {
            Bit::Zero
        }
    }
}

impl From<Bit> for bool {
    fn from(bit: Bit) -> Self {
        bit.is_one()
    }
}

impl Not for Bit {
    type Output = Bit;

    fn not(self) -> Bit {
        match self {
            Bit::Zero => Bit::One,
            Bit::One => Bit::Zero,
        }
    }
}

impl BitAnd for Bit {
    type Output = Bit;

    fn bitand(self, rhs: Bit) -> Bit {
        Bit::from(self.is_one() && rhs.is_one())
    }
}

impl BitOr for Bit {
    type Output = Bit;

    fn bitor(self, rhs: Bit) -> Bit {
        Bit::from(self.is_one() || rhs.is_one())
    }
}

impl BitXor for Bit {
    type Output = Bit;

    fn bitxor(self, rhs: Bit) -> Bit {
        Bit::from(self != rhs)
    }
}

impl fmt::Display for Bit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}
