//! Exact two-level minimization
//!
//! Minimal sum-of-products and product-of-sums forms are found with the
//! Quine-McCluskey method:
//!
//! 1. [`prime_implicants`] merges minterms that differ in one variable until no
//!    further merges are possible; the survivors are the prime implicants.
//! 2. [`select_cover`] takes every essential prime, then runs Petrick's method
//!    over the minterms that are still uncovered.
//!
//! A product of sums is the same computation on the maxterms, read back as
//! disjunctions.
//!
//! The result is a [`Cover`], which can be turned back into an expression
//! tree with [`Cover::to_expr`].

mod cubes;
mod minimizable;
mod petrick;
mod primes;

pub use cubes::Implicant;
pub use minimizable::{Minimizable, TwoLevelForm};
pub use petrick::select_cover;
pub use primes::prime_implicants;

use crate::expression::{BinaryOp, Expr, Span};
use crate::value::Bit;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// A minimal set of implicants over named variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    variables: Vec<Arc<str>>,
    form: TwoLevelForm,
    implicants: Vec<Implicant>,
}

impl Cover {
    /// Minimal cover of `terms`
    ///
    /// `terms` are minterm indices for [`TwoLevelForm::SumOfProducts`] and
    /// maxterm indices for [`TwoLevelForm::ProductOfSums`]. Index bits are
    /// read most significant first, so variable 0 is the highest bit.
    pub fn minimal(variables: Vec<Arc<str>>, terms: &BTreeSet<usize>, form: TwoLevelForm) -> Cover {
        let primes = prime_implicants(variables.len(), terms);
        let mut implicants: Vec<Implicant> = select_cover(&primes, terms)
            .into_iter()
            .map(|i| primes[i].clone())
            .collect();
        implicants.sort_by(|a, b| {
            a.minterms
                .first()
                .cmp(&b.minterms.first())
                .then_with(|| a.pattern().cmp(&b.pattern()))
        });

        log::debug!(
            "Minimized {} term(s) over {} variable(s) to {} {} implicant(s)",
            terms.len(),
            variables.len(),
            implicants.len(),
            form
        );

        Cover {
            variables,
            form,
            implicants,
        }
    }

    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }

    pub fn form(&self) -> TwoLevelForm {
        self.form
    }

    /// Selected implicants, ordered by the first term each covers
    pub fn implicants(&self) -> &[Implicant] {
        &self.implicants
    }

    pub fn num_implicants(&self) -> usize {
        self.implicants.len()
    }

    /// Total number of literals across all implicants
    pub fn literal_count(&self) -> usize {
        self.implicants.iter().map(|cube| cube.literal_count()).sum()
    }

    /// Rebuild the cover as an expression; every node gets `span`
    ///
    /// Constant functions come back as the literal `0` or `1`.
    pub fn to_expr(&self, span: Span) -> Arc<Expr> {
        let (empty, universal, join) = match self.form {
            TwoLevelForm::SumOfProducts => (Bit::Zero, Bit::One, BinaryOp::Or),
            TwoLevelForm::ProductOfSums => (Bit::One, Bit::Zero, BinaryOp::And),
        };
        if self.implicants.iter().any(|cube| cube.is_universal()) {
            return Expr::literal(universal, span);
        }

        self.implicants
            .iter()
            .map(|cube| match self.form {
                TwoLevelForm::SumOfProducts => cube.to_product(&self.variables, span),
                TwoLevelForm::ProductOfSums => cube.to_sum(&self.variables, span),
            })
            .reduce(|acc, term| Expr::binary(acc, join, term))
            .unwrap_or_else(|| Expr::literal(empty, span))
    }
}

impl fmt::Display for Cover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_expr(Span::default()))
    }
}

/// Minimal sum-of-products expression for the function that is 1 exactly on
/// `minterms`
///
/// ```
/// use bitlogic::cover::minimize;
/// use bitlogic::expression::Span;
/// use std::collections::BTreeSet;
/// use std::sync::Arc;
///
/// let vars: Vec<Arc<str>> = vec![Arc::from("A"), Arc::from("B")];
/// let minterms = BTreeSet::from([0b00, 0b01, 0b11]);
/// let expr = minimize(&vars, &minterms, Span::default());
/// assert_eq!(expr.to_string(), "not A or B");
/// ```
pub fn minimize(variables: &[Arc<str>], minterms: &BTreeSet<usize>, span: Span) -> Arc<Expr> {
    Cover::minimal(variables.to_vec(), minterms, TwoLevelForm::SumOfProducts).to_expr(span)
}

#[cfg(test)]
mod tests;
