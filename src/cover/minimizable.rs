//! Minimizable trait for two-level minimization
//!
//! This module provides the public [`Minimizable`] trait, a uniform way to ask
//! any Boolean function representation for its minimal two-level [`Cover`].

use super::Cover;
use crate::truth_table::TruthTable;
use std::fmt;

/// Which two-level shape a minimal cover takes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TwoLevelForm {
    /// OR of AND terms, built from the minterms
    SumOfProducts,
    /// AND of OR terms, built from the maxterms
    ProductOfSums,
}

impl fmt::Display for TwoLevelForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TwoLevelForm::SumOfProducts => write!(f, "SOP"),
            TwoLevelForm::ProductOfSums => write!(f, "POS"),
        }
    }
}

/// Types that can be reduced to a minimal two-level cover
///
/// Minimization is exact: the cover has the fewest terms possible, and among
/// those the fewest literals.
///
/// ```
/// use bitlogic::cover::Minimizable;
/// use bitlogic::{Bit, TruthTable};
/// use std::sync::Arc;
///
/// // 1 on 00, 01 and 11
/// let variables: Vec<Arc<str>> = vec![Arc::from("A"), Arc::from("B")];
/// let table = TruthTable::from_outputs(
///     variables,
///     "F",
///     vec![Bit::One, Bit::One, Bit::Zero, Bit::One],
/// )
/// .unwrap();
///
/// assert_eq!(table.minimize_sop().to_string(), "not A or B");
/// assert_eq!(table.minimize_pos().to_string(), "not A or B");
/// ```
pub trait Minimizable {
    /// Minimize into the requested form
    fn minimize(&self, form: TwoLevelForm) -> Cover;

    fn minimize_sop(&self) -> Cover {
        self.minimize(TwoLevelForm::SumOfProducts)
    }

    fn minimize_pos(&self) -> Cover {
        self.minimize(TwoLevelForm::ProductOfSums)
    }
}

impl Minimizable for TruthTable {
    fn minimize(&self, form: TwoLevelForm) -> Cover {
        let terms = match form {
            TwoLevelForm::SumOfProducts => self.minterms(),
            TwoLevelForm::ProductOfSums => self.maxterms(),
        };
        Cover::minimal(self.variables().to_vec(), &terms, form)
    }
}
