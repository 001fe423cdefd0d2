//! Binary operators and their truth tables

use crate::value::Bit;
use std::fmt;

/// The binary connectives of the language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Nand,
    Nor,
    Xnor,
    /// `a imply b` is `not a or b`
    Imply,
    /// `a nimply b` is `a and not b`
    Nimply,
}

impl BinaryOp {
    /// All operators, in declaration order
    pub const ALL: [BinaryOp; 8] = [
        BinaryOp::And,
        BinaryOp::Or,
        BinaryOp::Xor,
        BinaryOp::Nand,
        BinaryOp::Nor,
        BinaryOp::Xnor,
        BinaryOp::Imply,
        BinaryOp::Nimply,
    ];

    /// Apply the operator to two evaluated operands
    ///
    /// ```
    /// use bitlogic::expression::BinaryOp;
    /// use bitlogic::Bit::{One, Zero};
    ///
    /// assert_eq!(BinaryOp::Nand.apply(One, One), Zero);
    /// assert_eq!(BinaryOp::Imply.apply(Zero, One), One);
    /// assert_eq!(BinaryOp::Imply.apply(One, Zero), Zero);
    /// ```
    pub fn apply(self, a: Bit, b: Bit) -> Bit {
        match self {
            BinaryOp::And => a & b,
            BinaryOp::Or => a | b,
            BinaryOp::Xor => a ^ b,
            BinaryOp::Nand => !(a & b),
            BinaryOp::Nor => !(a | b),
            BinaryOp::Xnor => !(a ^ b),
            BinaryOp::Imply => !a | b,
            BinaryOp::Nimply => a & !b,
        }
    }

    /// Source keyword
    pub fn keyword(self) -> &'static str {
        match self {
            BinaryOp::And => "and",
            BinaryOp::Or => "or",
            BinaryOp::Xor => "xor",
            BinaryOp::Nand => "nand",
            BinaryOp::Nor => "nor",
            BinaryOp::Xnor => "xnor",
            BinaryOp::Imply => "imply",
            BinaryOp::Nimply => "nimply",
        }
    }

    /// Binding strength; higher binds tighter
    ///
    /// `not` sits above every binary operator.
    pub(crate) fn precedence(self) -> u8 {
        match self {
            BinaryOp::Imply | BinaryOp::Nimply => 1,
            BinaryOp::Or | BinaryOp::Nor => 2,
            BinaryOp::Xor | BinaryOp::Xnor => 3,
            BinaryOp::And | BinaryOp::Nand => 4,
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
