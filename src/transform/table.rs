//! Compiling function tables into algebraic function declarations

use crate::engine::RuntimeError;
use crate::expression::{BinaryOp, Expr};
use crate::program::{FunctionDecl, FunctionTable, TableRow};
use crate::value::Bit;
use std::collections::HashSet;
use std::sync::Arc;

/// Turn a table into an equivalent [`FunctionDecl`]
///
/// Bit `i` of a row pattern tests the `i`-th name of the parameters followed
/// by the subparameters. A pattern covers at least every parameter and may
/// go on into the subparameters. Each row becomes the conjunction of its
/// pattern literals and its output; the rows are then OR-ed together.
/// Combinations without a matching row produce `0`. The compiled function
/// takes the table's parameters followed by its subparameters.
///
/// ```
/// use bitlogic::program::{Program, Statement};
/// use bitlogic::transform::compile_table;
///
/// let program = Program::parse("MUX(S : A, B) = table { 0: A; 1: B; }").unwrap();
/// let Statement::FunctionTable(table) = &program.statements[0] else { panic!() };
///
/// let decl = compile_table(table).unwrap();
/// assert_eq!(decl.body.to_string(), "not S and A or S and B");
/// assert_eq!(decl.params.len(), 3);
/// ```
pub fn compile_table(table: &FunctionTable) -> Result<FunctionDecl, RuntimeError> {
    validate(table)?;

    let body = table
        .rows
        .iter()
        .map(|row| compile_row(table, row))
        .reduce(|acc, row| Expr::binary(acc, BinaryOp::Or, row))
        .unwrap_or_else(|| Expr::literal(Bit::Zero, table.span));

    log::debug!(
        "Compiled table {} with {} row(s) to {} node(s)",
        table.name,
        table.rows.len(),
        body.size()
    );

    Ok(FunctionDecl {
        name: Arc::clone(&table.name),
        params: table
            .params
            .iter()
            .chain(&table.subparams)
            .cloned()
            .collect(),
        body,
        span: table.span,
    })
}

fn compile_row(table: &FunctionTable, row: &TableRow) -> Arc<Expr> {
    let condition = table
        .params
        .iter()
        .chain(&table.subparams)
        .zip(&row.pattern)
        .map(|(param, bit)| {
            let var = Expr::variable(param, row.span);
            match bit {
                Bit::One => var,
                Bit::Zero => Expr::not(var, row.span),
            }
        })
        .reduce(|acc, literal| Expr::binary(acc, BinaryOp::And, literal));

    match condition {
        Some(condition) => Expr::binary(condition, BinaryOp::And, Arc::clone(&row.output)),
        None => Arc::clone(&row.output),
    }
}

fn validate(table: &FunctionTable) -> Result<(), RuntimeError> {
    let invalid = |message: String| RuntimeError::InvalidTable {
        name: Arc::clone(&table.name),
        message,
        span: table.span,
    };

    let mut names = HashSet::new();
    for name in table.params.iter().chain(&table.subparams) {
        if !names.insert(name) {
            return Err(invalid(format!("parameter `{}` is listed more than once", name)));
        }
    }

    let mut patterns = HashSet::new();
    for row in &table.rows {
        let pattern: String = row.pattern.iter().map(|bit| bit.as_char()).collect();
        let (min, max) = (table.params.len(), table.params.len() + table.subparams.len());
        if row.pattern.len() < min || row.pattern.len() > max {
            let expected = if min == max {
                min.to_string()
            } else {
                format!("{} to {}", min, max)
            };
            return Err(invalid(format!(
                "row `{}` has {} bit(s) but the table expects {}",
                pattern,
                row.pattern.len(),
                expected
            )));
        }
        if !patterns.insert(row.pattern.clone()) {
            return Err(invalid(format!("row `{}` appears more than once", pattern)));
        }
    }
    Ok(())
}
