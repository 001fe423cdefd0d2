//! Expression evaluation against the global environment and a local scope

use super::env::{Environment, LocalScope};
use super::error::RuntimeError;
use super::input::{InputError, InputSource, NoInput};
use crate::expression::{Builtin, Expr, ExprKind, Span};
use crate::value::Bit;
use crate::EngineConfig;
use std::sync::Arc;

/// Evaluates expressions to bits
///
/// Owns the [`Environment`] of a run and the input source used by `INPUT`.
/// A non-empty scope (a function activation or a truth-table row) makes plain
/// names resolve against it and `name*` against the globals. Without one,
/// either `None` or an empty scope, evaluation is at program level: plain
/// names are globals and `name*` is rejected.
pub struct Evaluator<'i> {
    env: Environment,
    input: Box<dyn InputSource + 'i>,
    config: EngineConfig,
    depth: usize,
}

impl Evaluator<'static> {
    /// Evaluator without an input source; `INPUT` fails
    pub fn new(config: EngineConfig) -> Self {
        Evaluator::with_input(config, NoInput)
    }
}

impl<'i> Evaluator<'i> {
    pub fn with_input(config: EngineConfig, input: impl InputSource + 'i) -> Self {
        Evaluator {
            env: Environment::new(),
            input: Box::new(input),
            config,
            depth: 0,
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.env
    }

    pub(crate) fn environment_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Evaluate `expr` to a bit
    ///
    /// Both operands of a binary node are always evaluated, left first.
    pub fn evaluate(&mut self, expr: &Expr, scope: Option<&LocalScope>) -> Result<Bit, RuntimeError> {
        match &expr.kind {
            ExprKind::Literal(bit) => Ok(*bit),
            ExprKind::Variable { name, reference } => {
                self.lookup(name, *reference, scope, expr.span)
            }
            ExprKind::Not(inner) => Ok(!self.evaluate(inner, scope)?),
            ExprKind::Binary { left, op, right } => {
                let a = self.evaluate(left, scope)?;
                let b = self.evaluate(right, scope)?;
                Ok(op.apply(a, b))
            }
            ExprKind::Call { name, args } => self.call(name, args, scope, expr.span),
            ExprKind::Builtin { builtin, params } => {
                self.evaluate_builtin(*builtin, params, scope, expr.span)
            }
            ExprKind::Str(_) => Err(RuntimeError::StringNotBinary { span: expr.span }),
            ExprKind::Error(message) => Err(RuntimeError::ErrorNode {
                message: Arc::clone(message),
                span: expr.span,
            }),
        }
    }

    fn lookup(
        &self,
        name: &Arc<str>,
        reference: bool,
        scope: Option<&LocalScope>,
        span: Span,
    ) -> Result<Bit, RuntimeError> {
        // Only a scope with bindings is active; a zero-parameter body reads globals
        let scope = scope.filter(|scope| !scope.is_empty());
        match (scope, reference) {
            (Some(scope), false) => {
                scope
                    .get(name)
                    .ok_or_else(|| RuntimeError::ParameterNotDefined {
                        name: Arc::clone(name),
                        span,
                    })
            }
            (Some(_), true) => {
                self.env
                    .variable(name)
                    .ok_or_else(|| RuntimeError::ReferenceNotDefined {
                        name: Arc::clone(name),
                        span,
                    })
            }
            (None, false) => {
                self.env
                    .variable(name)
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: Arc::clone(name),
                        span,
                    })
            }
            (None, true) => Err(RuntimeError::ReferenceAtTopLevel {
                name: Arc::clone(name),
                span,
            }),
        }
    }

    /// Evaluate arguments in the caller's scope, then the body in a fresh one
    fn call(
        &mut self,
        name: &Arc<str>,
        args: &[Arc<Expr>],
        scope: Option<&LocalScope>,
        span: Span,
    ) -> Result<Bit, RuntimeError> {
        let decl = match self.env.function(name) {
            Some(decl) => Arc::clone(decl),
            None => {
                return Err(RuntimeError::UndefinedFunction {
                    name: Arc::clone(name),
                    span,
                })
            }
        };
        if decl.params.len() != args.len() {
            return Err(RuntimeError::ArityMismatch {
                name: Arc::clone(name),
                expected: decl.params.len(),
                found: args.len(),
                span,
            });
        }

        let mut local = LocalScope::new();
        for (param, arg) in decl.params.iter().zip(args) {
            let value = self.evaluate(arg, scope)?;
            local.bind(Arc::clone(param), value);
        }

        if self.depth >= self.config.max_call_depth {
            return Err(RuntimeError::RecursionLimit {
                name: Arc::clone(name),
                limit: self.config.max_call_depth,
                span,
            });
        }
        log::trace!("Enter {} at depth {}", name, self.depth);
        self.depth += 1;
        let result = self.evaluate(&decl.body, Some(&local));
        self.depth -= 1;
        result
    }

    fn evaluate_builtin(
        &mut self,
        builtin: Builtin,
        params: &[Arc<Expr>],
        scope: Option<&LocalScope>,
        span: Span,
    ) -> Result<Bit, RuntimeError> {
        match builtin {
            // Gate and solve forms only change how an expression is shown
            Builtin::ToNand | Builtin::ToNor | Builtin::SolveSop | Builtin::SolvePos => {
                let operand = single_operand(builtin, params, span)?;
                self.evaluate(operand, scope)
            }
            Builtin::Input => {
                let prompt = input_prompt(params, span)?;
                self.input.request(&prompt).map_err(|err| match err {
                    InputError::Unavailable => RuntimeError::InputUnavailable { prompt, span },
                    InputError::Cancelled => RuntimeError::InputCancelled { prompt, span },
                })
            }
            Builtin::Print
            | Builtin::Show
            | Builtin::Table
            | Builtin::Graph
            | Builtin::Export
            | Builtin::Import => Err(RuntimeError::InvalidBuiltinInExpression { builtin, span }),
        }
    }
}

/// The one parameter of `TO_NAND`, `TO_NOR`, `SOLVE_SOP` or `SOLVE_POS`
pub(crate) fn single_operand(
    builtin: Builtin,
    params: &[Arc<Expr>],
    span: Span,
) -> Result<&Arc<Expr>, RuntimeError> {
    match params {
        [operand] => Ok(operand),
        _ => Err(RuntimeError::InvalidArgument {
            builtin,
            message: format!("expected exactly one expression, found {}", params.len()),
            span,
        }),
    }
}

fn input_prompt(params: &[Arc<Expr>], span: Span) -> Result<Arc<str>, RuntimeError> {
    match params {
        [] => Ok(Arc::from(Builtin::Input.keyword())),
        [prompt] => match &prompt.kind {
            ExprKind::Str(text) => Ok(Arc::clone(text)),
            _ => Err(RuntimeError::InvalidArgument {
                builtin: Builtin::Input,
                message: "the prompt must be a string literal".to_string(),
                span,
            }),
        },
        _ => Err(RuntimeError::InvalidArgument {
            builtin: Builtin::Input,
            message: format!("expected at most one prompt, found {}", params.len()),
            span,
        }),
    }
}
