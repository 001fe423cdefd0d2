//! Statement execution
//!
//! The [`Executor`] walks a [`Program`] in order. Declarations populate the
//! global [`Environment`]; `PRINT`, `SHOW` and `TABLE` statements append one
//! unit of output each. The first failing statement stops the run: there is no
//! skip-and-continue, and the error reports the statement together with the
//! output produced so far.
//!
//! # Examples
//!
//! ```
//! use bitlogic::engine::Executor;
//! use bitlogic::{EngineConfig, Program};
//!
//! let program = Program::parse(
//!     "B = 1;
//!      F(A) = A and B*;
//!      PRINT(F(0), F(1));",
//! )
//! .unwrap();
//!
//! let mut executor = Executor::new(EngineConfig::default());
//! let output = executor.run(&program).unwrap();
//! assert_eq!(output, vec!["0 1"]);
//! ```

mod env;
pub mod error;
mod eval;
mod input;
mod show;

pub use env::{Environment, LocalScope};
pub use error::{DeclKind, ErrorClass, ExecutionError, RuntimeError};
pub use eval::Evaluator;
pub use input::{ChannelInput, FnInput, InputError, InputRequest, InputSource, NoInput, ReaderInput};

use crate::expression::{Builtin, Expr, ExprKind, Span};
use crate::program::{Program, Statement};
use crate::transform::compile_table;
use crate::truth_table::TruthTable;
use crate::EngineConfig;
use std::sync::Arc;

/// Runs programs statement by statement
///
/// One executor owns one environment. Running a second program on the same
/// executor sees the declarations of the first.
pub struct Executor<'i> {
    evaluator: Evaluator<'i>,
    output: Vec<String>,
}

impl Executor<'static> {
    /// Executor whose `INPUT` requests fail with
    /// [`RuntimeError::InputUnavailable`]
    pub fn new(config: EngineConfig) -> Self {
        Executor {
            evaluator: Evaluator::new(config),
            output: Vec::new(),
        }
    }
}

impl<'i> Executor<'i> {
    /// Executor that answers `INPUT` from `input`
    pub fn with_input(config: EngineConfig, input: impl InputSource + 'i) -> Self {
        Executor {
            evaluator: Evaluator::with_input(config, input),
            output: Vec::new(),
        }
    }

    pub fn evaluator(&self) -> &Evaluator<'i> {
        &self.evaluator
    }

    pub fn evaluator_mut(&mut self) -> &mut Evaluator<'i> {
        &mut self.evaluator
    }

    pub fn environment(&self) -> &Environment {
        self.evaluator.environment()
    }

    /// Output units produced so far
    pub fn output(&self) -> &[String] {
        &self.output
    }

    /// Execute every statement of `program` in order
    ///
    /// Returns the output units produced by this run. On failure the error
    /// carries the failing statement and the units produced before it.
    pub fn run(&mut self, program: &Program) -> Result<Vec<String>, ExecutionError> {
        let start = self.output.len();
        for (index, statement) in program.iter().enumerate() {
            log::debug!("Executing statement {}: {}", index, statement);
            if let Err(error) = self.execute(statement) {
                log::debug!("Statement {} failed: {}", index, error);
                return Err(ExecutionError {
                    index,
                    statement: statement.to_string(),
                    statement_span: statement.span(),
                    error,
                    output: self.output[start..].to_vec(),
                });
            }
        }
        Ok(self.output[start..].to_vec())
    }

    /// Execute one statement
    pub fn execute(&mut self, statement: &Statement) -> Result<(), RuntimeError> {
        match statement {
            Statement::Variable { name, init, span } => {
                self.environment_mut().ensure_undeclared(name, *span)?;
                let value = self.evaluator.evaluate(init, None)?;
                self.environment_mut()
                    .declare_variable(Arc::clone(name), value, *span)
            }
            Statement::Function(decl) => self.environment_mut().declare_function(decl.clone()),
            Statement::FunctionTable(table) => {
                self.environment_mut().ensure_undeclared(&table.name, table.span)?;
                let decl = compile_table(table)?;
                self.environment_mut().declare_function(decl)
            }
            Statement::Builtin {
                builtin,
                args,
                span,
            } => self.execute_builtin(*builtin, args, *span),
            Statement::Error { message, span } => Err(RuntimeError::ErrorNode {
                message: Arc::clone(message),
                span: *span,
            }),
        }
    }

    fn environment_mut(&mut self) -> &mut Environment {
        self.evaluator.environment_mut()
    }

    fn execute_builtin(
        &mut self,
        builtin: Builtin,
        args: &[Arc<Expr>],
        span: Span,
    ) -> Result<(), RuntimeError> {
        let unit = match builtin {
            Builtin::Print => self.print(args)?,
            Builtin::Show => args
                .iter()
                .map(|arg| Ok(self.evaluator.resolve_for_display(arg)?.to_string()))
                .collect::<Result<Vec<_>, RuntimeError>>()?
                .join("\n"),
            Builtin::Table => args
                .iter()
                .map(|arg| Ok(TruthTable::evaluate(arg, &mut self.evaluator)?.to_string()))
                .collect::<Result<Vec<_>, RuntimeError>>()?
                .join("\n\n"),
            Builtin::Graph | Builtin::Export | Builtin::Import => {
                return Err(RuntimeError::NotSupported { builtin, span })
            }
            Builtin::ToNand
            | Builtin::ToNor
            | Builtin::SolveSop
            | Builtin::SolvePos
            | Builtin::Input => return Err(RuntimeError::InvalidBuiltinInStatement { builtin, span }),
        };
        self.output.push(unit);
        Ok(())
    }

    fn print(&mut self, args: &[Arc<Expr>]) -> Result<String, RuntimeError> {
        let mut parts = Vec::with_capacity(args.len());
        for arg in args {
            match &arg.kind {
                ExprKind::Str(text) => parts.push(text.to_string()),
                _ => parts.push(self.evaluator.evaluate(arg, None)?.to_string()),
            }
        }
        Ok(parts.join(self.evaluator.config().print_separator.as_str()))
    }
}

#[cfg(test)]
mod tests;
