//! Statements and programs
//!
//! A [`Program`] is the ordered statement sequence handed to the
//! [`Executor`](crate::engine::Executor). Statements are consumed in source
//! order, exactly once.

use crate::expression::{Builtin, Expr, Span};
use crate::value::Bit;
use std::fmt;
use std::sync::Arc;

/// An algebraic function declaration: `F(A, B) = A and B;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub name: Arc<str>,
    pub params: Vec<Arc<str>>,
    pub body: Arc<Expr>,
    pub span: Span,
}

/// One row of a function table: a bit pattern over the parameters (and
/// possibly subparameters) and the expression produced when the arguments
/// match it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub pattern: Vec<Bit>,
    pub output: Arc<Expr>,
    pub span: Span,
}

impl TableRow {
    /// Build a row from a pattern as written in source (`"0110"`)
    ///
    /// Returns `None` if the pattern contains anything but `0` and `1`.
    pub fn parse(pattern: &str, output: Arc<Expr>, span: Span) -> Option<TableRow> {
        let pattern = pattern
            .chars()
            .map(Bit::from_char)
            .collect::<Option<Vec<_>>>()?;
        Some(TableRow {
            pattern,
            output,
            span,
        })
    }
}

/// A truth-table function declaration
///
/// ```text
/// MUX(S : A, B) = table { 0: A; 1: B; }
/// ```
///
/// Row patterns test the parameters and may go on into the subparameters;
/// subparameters are extra formal parameters that row outputs may refer to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionTable {
    pub name: Arc<str>,
    pub params: Vec<Arc<str>>,
    pub subparams: Vec<Arc<str>>,
    pub rows: Vec<TableRow>,
    pub span: Span,
}

/// A top-level statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `NAME = expr;`
    Variable {
        name: Arc<str>,
        init: Arc<Expr>,
        span: Span,
    },
    Function(FunctionDecl),
    FunctionTable(FunctionTable),
    /// `PRINT(...)`, `SHOW(...)`, ... at statement level
    Builtin {
        builtin: Builtin,
        args: Vec<Arc<Expr>>,
        span: Span,
    },
    /// Placeholder left by the front end for a malformed statement
    Error { message: Arc<str>, span: Span },
}

impl Statement {
    pub fn variable(name: &str, init: Arc<Expr>, span: Span) -> Statement {
        Statement::Variable {
            name: Arc::from(name),
            init,
            span,
        }
    }

    pub fn function(name: &str, params: &[&str], body: Arc<Expr>, span: Span) -> Statement {
        Statement::Function(FunctionDecl {
            name: Arc::from(name),
            params: params.iter().map(|p| Arc::from(*p)).collect(),
            body,
            span,
        })
    }

    pub fn builtin(builtin: Builtin, args: Vec<Arc<Expr>>, span: Span) -> Statement {
        Statement::Builtin {
            builtin,
            args,
            span,
        }
    }

    pub fn error(message: impl Into<String>, span: Span) -> Statement {
        let message: String = message.into();
        Statement::Error {
            message: Arc::from(message.as_str()),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Statement::Variable { span, .. }
            | Statement::Builtin { span, .. }
            | Statement::Error { span, .. } => *span,
            Statement::Function(decl) => decl.span,
            Statement::FunctionTable(table) => table.span,
        }
    }

    /// The name this statement declares, if any
    pub fn declared_name(&self) -> Option<&Arc<str>> {
        match self {
            Statement::Variable { name, .. } => Some(name),
            Statement::Function(decl) => Some(&decl.name),
            Statement::FunctionTable(table) => Some(&table.name),
            Statement::Builtin { .. } | Statement::Error { .. } => None,
        }
    }
}

/// An ordered sequence of statements
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Program { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Statement> {
        self.statements.iter()
    }
}

impl From<Vec<Statement>> for Program {
    fn from(statements: Vec<Statement>) -> Self {
        Program { statements }
    }
}

impl<'a> IntoIterator for &'a Program {
    type Item = &'a Statement;
    type IntoIter = std::slice::Iter<'a, Statement>;

    fn into_iter(self) -> Self::IntoIter {
        self.statements.iter()
    }
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{}", item)?;
    }
    Ok(())
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Variable { name, init, .. } => write!(f, "{} = {};", name, init),
            Statement::Function(decl) => {
                write!(f, "{}(", decl.name)?;
                write_list(f, &decl.params)?;
                write!(f, ") = {};", decl.body)
            }
            Statement::FunctionTable(table) => {
                write!(f, "{}(", table.name)?;
                write_list(f, &table.params)?;
                if !table.subparams.is_empty() {
                    write!(f, " : ")?;
                    write_list(f, &table.subparams)?;
                }
                write!(f, ") = table {{")?;
                for row in &table.rows {
                    let pattern: String = row.pattern.iter().map(|bit| bit.as_char()).collect();
                    write!(f, " {}: {};", pattern, row.output)?;
                }
                write!(f, " }}")
            }
            Statement::Builtin { builtin, args, .. } => {
                write!(f, "{}(", builtin)?;
                write_list(f, args)?;
                write!(f, ");")
            }
            Statement::Error { message, .. } => write!(f, "<error: {}>", message),
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}
