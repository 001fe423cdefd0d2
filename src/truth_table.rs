//! Truth tables of expressions
//!
//! A [`TruthTable`] enumerates every assignment of an expression's variables in
//! counting order (the first variable is the most significant bit) and records
//! the expression's value for each. It backs the `TABLE` builtin and supplies
//! the minterms the minimizer works from.

use crate::engine::{Evaluator, LocalScope, RuntimeError};
use crate::expression::Expr;
use crate::value::Bit;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

/// The output of a function for every input combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthTable {
    variables: Vec<Arc<str>>,
    label: String,
    outputs: Vec<Bit>,
}

impl TruthTable {
    /// Enumerate `expr` over its variables
    ///
    /// `expr` is a program-level expression whose variables become the
    /// columns, so a reference variable (`name*`) in it fails with
    /// [`RuntimeError::ReferenceAtTopLevel`]. Called functions may still use
    /// references in their bodies. Fails with [`RuntimeError::TableTooLarge`]
    /// when the expression has more variables than the evaluator's configured
    /// limit.
    ///
    /// ```
    /// use bitlogic::engine::Evaluator;
    /// use bitlogic::expression::Expr;
    /// use bitlogic::{Bit, EngineConfig, TruthTable};
    ///
    /// let expr = Expr::parse("A xor B").unwrap();
    /// let mut evaluator = Evaluator::new(EngineConfig::default());
    /// let table = TruthTable::evaluate(&expr, &mut evaluator).unwrap();
    ///
    /// assert_eq!(table.outputs(), &[Bit::Zero, Bit::One, Bit::One, Bit::Zero]);
    /// println!("{}", table);
    /// ```
    pub fn evaluate(expr: &Expr, evaluator: &mut Evaluator<'_>) -> Result<TruthTable, RuntimeError> {
        if let Some((name, span)) = expr.first_reference() {
            return Err(RuntimeError::ReferenceAtTopLevel {
                name: Arc::clone(name),
                span,
            });
        }

        let variables = expr.variables();
        // Row indices are usize
        let limit = evaluator
            .config()
            .max_table_variables
            .min(usize::BITS as usize - 1);
        if variables.len() > limit {
            return Err(RuntimeError::TableTooLarge {
                variables: variables.len(),
                limit,
                span: expr.span,
            });
        }

        let width = variables.len();
        let mut outputs = Vec::with_capacity(1 << width);
        for index in 0..1usize << width {
            let scope: LocalScope = variables
                .iter()
                .cloned()
                .zip(Bit::pattern(index, width))
                .collect();
            outputs.push(evaluator.evaluate(expr, Some(&scope))?);
        }

        Ok(TruthTable {
            variables,
            label: expr.to_string(),
            outputs,
        })
    }

    /// Build a table from an output column
    ///
    /// Returns `None` unless there is exactly one output per input combination.
    pub fn from_outputs(
        variables: Vec<Arc<str>>,
        label: impl Into<String>,
        outputs: Vec<Bit>,
    ) -> Option<TruthTable> {
        let rows = u32::try_from(variables.len())
            .ok()
            .and_then(|width| 1usize.checked_shl(width))?;
        if outputs.len() != rows {
            return None;
        }
        Some(TruthTable {
            variables,
            label: label.into(),
            outputs,
        })
    }

    pub fn variables(&self) -> &[Arc<str>] {
        &self.variables
    }

    /// Column header of the output, normally the expression's source text
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn outputs(&self) -> &[Bit] {
        &self.outputs
    }

    pub fn num_rows(&self) -> usize {
        self.outputs.len()
    }

    /// Iterate over `(inputs, output)` pairs in row order
    pub fn rows(&self) -> impl Iterator<Item = (Vec<Bit>, Bit)> + '_ {
        let width = self.variables.len();
        self.outputs
            .iter()
            .enumerate()
            .map(move |(index, &output)| (Bit::pattern(index, width), output))
    }

    /// Row indices where the output is 1
    pub fn minterms(&self) -> BTreeSet<usize> {
        self.indices_where(Bit::One)
    }

    /// Row indices where the output is 0
    pub fn maxterms(&self) -> BTreeSet<usize> {
        self.indices_where(Bit::Zero)
    }

    fn indices_where(&self, value: Bit) -> BTreeSet<usize> {
        self.outputs
            .iter()
            .enumerate()
            .filter(|&(_, &output)| output == value)
            .map(|(index, _)| index)
            .collect()
    }
}

impl fmt::Display for TruthTable {
    /// One column per variable and a final column for the output
    ///
    /// ```text
    /// A | B | A and B
    /// --+---+--------
    /// 0 | 0 | 0
    /// ...
    /// ```
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<&str> = self
            .variables
            .iter()
            .map(|name| name.as_ref())
            .chain(std::iter::once(self.label.as_str()))
            .collect();
        let widths: Vec<usize> = headers.iter().map(|h| h.chars().count().max(1)).collect();

        write_row(f, &headers, &widths)?;
        let rule: Vec<String> = widths.iter().map(|&w| "-".repeat(w)).collect();
        write!(f, "\n{}", rule.join("-+-"))?;

        for (inputs, output) in self.rows() {
            let cells: Vec<String> = inputs
                .iter()
                .chain(std::iter::once(&output))
                .map(|bit| bit.to_string())
                .collect();
            writeln!(f)?;
            write_row(f, &cells, &widths)?;
        }
        Ok(())
    }
}

fn write_row<S: AsRef<str>>(f: &mut fmt::Formatter<'_>, cells: &[S], widths: &[usize]) -> fmt::Result {
    let last = cells.len().saturating_sub(1);
    for (i, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            write!(f, " | ")?;
        }
        if i == last {
            write!(f, "{}", cell.as_ref())?;
        } else {
            write!(f, "{:<width$}", cell.as_ref(), width = width)?;
        }
    }
    Ok(())
}
