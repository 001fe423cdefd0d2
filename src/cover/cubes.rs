//! Implicant cubes for two-level minimization
//!
//! An [`Implicant`] is a cube over the input variables: each position is
//! `Some(false)` (variable must be 0), `Some(true)` (must be 1) or `None`
//! (don't care). It also records which minterm indices of the original
//! function it covers, so merges can be tracked without re-expanding cubes.

use crate::expression::{BinaryOp, Expr, Span};
use crate::value::Bit;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A product term over the input variables, with the minterms it covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Implicant {
    pub(crate) inputs: Vec<Option<bool>>,
    pub(crate) minterms: BTreeSet<usize>,
}

impl Implicant {
    /// The cube of a single minterm; variable 0 is the most significant bit
    pub fn from_minterm(index: usize, width: usize) -> Self {
        Implicant {
            inputs: Bit::pattern(index, width)
                .into_iter()
                .map(|bit| Some(bit.is_one()))
                .collect(),
            minterms: BTreeSet::from([index]),
        }
    }

    /// Get the inputs of this cube
    ///
    /// - `Some(false)` - input must be 0
    /// - `Some(true)` - input must be 1
    /// - `None` - don't care
    pub fn inputs(&self) -> &[Option<bool>] {
        &self.inputs
    }

    /// Indices of the original minterms this cube covers
    pub fn minterms(&self) -> &BTreeSet<usize> {
        &self.minterms
    }

    /// Number of inputs fixed to 1
    pub fn ones(&self) -> usize {
        self.inputs.iter().filter(|input| **input == Some(true)).count()
    }

    /// Number of fixed inputs, i.e. literals in the product term
    pub fn literal_count(&self) -> usize {
        self.inputs.iter().filter(|input| input.is_some()).count()
    }

    /// True if no input is fixed (the cube covers every combination)
    pub fn is_universal(&self) -> bool {
        self.inputs.iter().all(|input| input.is_none())
    }

    /// True if the cube contains the combination with this index
    pub fn covers(&self, index: usize) -> bool {
        let width = self.inputs.len();
        Bit::pattern(index, width)
            .into_iter()
            .zip(&self.inputs)
            .all(|(bit, input)| input.map_or(true, |value| value == bit.is_one()))
    }

    /// Merge two cubes that differ in exactly one fixed input
    ///
    /// Both cubes must have their don't-cares in the same positions. The
    /// result has a don't-care where they differed and covers the union of
    /// their minterms.
    pub fn combine(&self, other: &Implicant) -> Option<Implicant> {
        if self.inputs.len() != other.inputs.len() {
            return None;
        }
        let mut differing = None;
        for (i, (a, b)) in self.inputs.iter().zip(&other.inputs).enumerate() {
            match (a, b) {
                (Some(x), Some(y)) if x != y => {
                    if differing.is_some() {
                        return None;
                    }
                    differing = Some(i);
                }
                (Some(_), Some(_)) | (None, None) => {}
                _ => return None,
            }
        }

        let position = differing?;
        let mut inputs = self.inputs.clone();
        inputs[position] = None;
        Some(Implicant {
            inputs,
            minterms: self.minterms.union(&other.minterms).copied().collect(),
        })
    }

    /// The cube written as `-`, `0` and `1` characters
    pub fn pattern(&self) -> String {
        self.inputs
            .iter()
            .map(|input| match input {
                None => '-',
                Some(false) => '0',
                Some(true) => '1',
            })
            .collect()
    }

    /// The cube as a conjunction of literals; `1` when universal
    pub(crate) fn to_product(&self, variables: &[Arc<str>], span: Span) -> Arc<Expr> {
        self.literals(variables, span, false)
            .reduce(|acc, literal| Expr::binary(acc, BinaryOp::And, literal))
            .unwrap_or_else(|| Expr::literal(Bit::One, span))
    }

    /// The cube of a maxterm group as a disjunction; `0` when universal
    ///
    /// A 0 bit contributes the plain variable and a 1 bit its negation, so the
    /// sum is false exactly on the cube.
    pub(crate) fn to_sum(&self, variables: &[Arc<str>], span: Span) -> Arc<Expr> {
        self.literals(variables, span, true)
            .reduce(|acc, literal| Expr::binary(acc, BinaryOp::Or, literal))
            .unwrap_or_else(|| Expr::literal(Bit::Zero, span))
    }

    fn literals<'a>(
        &'a self,
        variables: &'a [Arc<str>],
        span: Span,
        negate_ones: bool,
    ) -> impl Iterator<Item = Arc<Expr>> + 'a {
        variables
            .iter()
            .zip(&self.inputs)
            .filter_map(move |(name, input)| {
                let value = (*input)?;
                let var = Expr::variable(name, span);
                Some(if value != negate_ones {
                    var
                } else {
                    Expr::not(var, span)
                })
            })
    }
}

impl fmt::Display for Implicant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<Arc<str>> {
        names.iter().map(|name| Arc::from(*name)).collect()
    }

    #[test]
    fn test_from_minterm_is_msb_first() {
        let cube = Implicant::from_minterm(0b011, 3);
        assert_eq!(cube.pattern(), "011");
        assert_eq!(cube.ones(), 2);
        assert_eq!(cube.literal_count(), 3);
    }

    #[test]
    fn test_combine_adjacent() {
        let a = Implicant::from_minterm(0b010, 3);
        let b = Implicant::from_minterm(0b011, 3);
        let merged = a.combine(&b).unwrap();
        assert_eq!(merged.pattern(), "01-");
        assert_eq!(merged.minterms().iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert!(merged.covers(2) && merged.covers(3));
        assert!(!merged.covers(1));
    }

    #[test]
    fn test_combine_rejects_distant_or_misaligned() {
        let a = Implicant::from_minterm(0b000, 3);
        let b = Implicant::from_minterm(0b011, 3);
        assert!(a.combine(&b).is_none());

        let left = a.combine(&Implicant::from_minterm(0b001, 3)).unwrap(); // 00-
        let right = a.combine(&Implicant::from_minterm(0b010, 3)).unwrap(); // 0-0
        assert!(left.combine(&right).is_none());
        assert!(a.combine(&a).is_none());
    }

    #[test]
    fn test_product_and_sum() {
        let vars = names(&["A", "B", "C"]);
        let cube = Implicant {
            inputs: vec![Some(true), None, Some(false)],
            minterms: BTreeSet::new(),
        };
        assert_eq!(cube.to_product(&vars, Span::default()).to_string(), "A and not C");
        assert_eq!(cube.to_sum(&vars, Span::default()).to_string(), "not A or C");

        let universal = Implicant {
            inputs: vec![None; 3],
            minterms: BTreeSet::new(),
        };
        assert!(universal.is_universal());
        assert_eq!(universal.to_product(&vars, Span::default()).to_string(), "1");
        assert_eq!(universal.to_sum(&vars, Span::default()).to_string(), "0");
    }

    #[test]
    fn test_pattern_order_puts_dont_care_first() {
        let mut patterns = vec!["1-".to_string(), "0-".to_string(), "-1".to_string()];
        patterns.sort();
        assert_eq!(patterns, vec!["-1", "0-", "1-"]);
    }
}
