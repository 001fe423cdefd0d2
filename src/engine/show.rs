//! Resolving expressions for `SHOW`
//!
//! `SHOW` prints source text rather than values, but builtins that rewrite an
//! expression are expanded first: `TO_NAND`/`TO_NOR` become their gate form
//! and `SOLVE_SOP`/`SOLVE_POS` their minimal two-level form. With
//! `inline_calls` enabled, user function calls are replaced by their bodies.

use super::error::RuntimeError;
use super::eval::{single_operand, Evaluator};
use crate::cover::{Minimizable, TwoLevelForm};
use crate::expression::{Builtin, Expr, ExprKind};
use crate::program::FunctionDecl;
use crate::transform::{to_gate_form, UniversalGate};
use crate::truth_table::TruthTable;
use std::collections::HashMap;
use std::sync::Arc;

impl<'i> Evaluator<'i> {
    /// The expression `SHOW` displays for `expr`
    ///
    /// ```
    /// use bitlogic::engine::Evaluator;
    /// use bitlogic::expression::Expr;
    /// use bitlogic::EngineConfig;
    ///
    /// let mut evaluator = Evaluator::new(EngineConfig::default());
    /// let expr = Expr::parse("SOLVE_SOP(A and B or A and not B)").unwrap();
    /// let shown = evaluator.resolve_for_display(&expr).unwrap();
    /// assert_eq!(shown.to_string(), "A");
    /// ```
    pub fn resolve_for_display(&mut self, expr: &Arc<Expr>) -> Result<Arc<Expr>, RuntimeError> {
        let mut inlining = Vec::new();
        self.resolve(expr, &mut inlining)
    }

    fn resolve(
        &mut self,
        expr: &Arc<Expr>,
        inlining: &mut Vec<Arc<str>>,
    ) -> Result<Arc<Expr>, RuntimeError> {
        let resolved = match &expr.kind {
            ExprKind::Literal(_) | ExprKind::Str(_) | ExprKind::Variable { .. } | ExprKind::Error(_) => {
                Arc::clone(expr)
            }
            ExprKind::Not(inner) => Expr::new(ExprKind::Not(self.resolve(inner, inlining)?), expr.span),
            ExprKind::Binary { left, op, right } => Expr::new(
                ExprKind::Binary {
                    left: self.resolve(left, inlining)?,
                    op: *op,
                    right: self.resolve(right, inlining)?,
                },
                expr.span,
            ),
            ExprKind::Call { name, args } => {
                let args = args
                    .iter()
                    .map(|arg| self.resolve(arg, inlining))
                    .collect::<Result<Vec<_>, _>>()?;
                match self.inline_candidate(name, args.len(), inlining) {
                    Some(decl) => {
                        inlining.push(Arc::clone(name));
                        let body = self.resolve(&decl.body, inlining);
                        inlining.pop();
                        let bindings: HashMap<Arc<str>, Arc<Expr>> =
                            decl.params.iter().cloned().zip(args).collect();
                        substitute(&body?, &bindings)
                    }
                    None => Expr::new(
                        ExprKind::Call {
                            name: Arc::clone(name),
                            args,
                        },
                        expr.span,
                    ),
                }
            }
            ExprKind::Builtin { builtin, params } => match builtin {
                Builtin::ToNand | Builtin::ToNor => {
                    let operand = single_operand(*builtin, params, expr.span)?;
                    let gate = match builtin {
                        Builtin::ToNand => UniversalGate::Nand,
                        _ => UniversalGate::Nor,
                    };
                    to_gate_form(&self.resolve(operand, inlining)?, gate)
                }
                Builtin::SolveSop | Builtin::SolvePos => {
                    let operand = single_operand(*builtin, params, expr.span)?;
                    let form = match builtin {
                        Builtin::SolveSop => TwoLevelForm::SumOfProducts,
                        _ => TwoLevelForm::ProductOfSums,
                    };
                    TruthTable::evaluate(operand, self)?
                        .minimize(form)
                        .to_expr(operand.span)
                }
                _ => {
                    let params = params
                        .iter()
                        .map(|param| self.resolve(param, inlining))
                        .collect::<Result<Vec<_>, _>>()?;
                    Expr::builtin(*builtin, params, expr.span)
                }
            },
        };
        Ok(resolved)
    }

    /// The declaration to inline for a call, if inlining applies
    fn inline_candidate(
        &self,
        name: &Arc<str>,
        arity: usize,
        inlining: &[Arc<str>],
    ) -> Option<Arc<FunctionDecl>> {
        if !self.config().inline_calls || inlining.contains(name) {
            return None;
        }
        self.environment()
            .function(name)
            .filter(|decl| decl.params.len() == arity)
            .cloned()
    }
}

/// Replace the parameters of a function body with argument expressions
///
/// Reference variables (`name*`) are globals and are left alone.
fn substitute(body: &Arc<Expr>, bindings: &HashMap<Arc<str>, Arc<Expr>>) -> Arc<Expr> {
    match &body.kind {
        ExprKind::Variable {
            name,
            reference: false,
        } => match bindings.get(name) {
            Some(arg) => Arc::clone(arg),
            None => Arc::clone(body),
        },
        ExprKind::Not(inner) => Expr::new(ExprKind::Not(substitute(inner, bindings)), body.span),
        ExprKind::Binary { left, op, right } => Expr::new(
            ExprKind::Binary {
                left: substitute(left, bindings),
                op: *op,
                right: substitute(right, bindings),
            },
            body.span,
        ),
        ExprKind::Call { name, args } => Expr::new(
            ExprKind::Call {
                name: Arc::clone(name),
                args: args.iter().map(|arg| substitute(arg, bindings)).collect(),
            },
            body.span,
        ),
        ExprKind::Builtin { builtin, params } => Expr::builtin(
            *builtin,
            params.iter().map(|param| substitute(param, bindings)).collect(),
            body.span,
        ),
        ExprKind::Variable { .. } | ExprKind::Literal(_) | ExprKind::Str(_) | ExprKind::Error(_) => {
            Arc::clone(body)
        }
    }
}
