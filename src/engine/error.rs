//! Runtime error types for the execution engine
//!
//! Every failure is fatal to the current run. [`RuntimeError::class`] groups the
//! variants so tooling can tell a declaration conflict from an unsupported
//! operation without matching on messages.

use crate::expression::{Builtin, Span};
use std::fmt;
use std::io;
use std::sync::Arc;

/// What kind of entity already owns a name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Variable,
    Function,
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclKind::Variable => write!(f, "variable"),
            DeclKind::Function => write!(f, "function"),
        }
    }
}

/// Coarse classification of runtime errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// Duplicate or ambiguous variable/function names
    DeclarationConflict,
    /// Undefined names, arity mismatches, misused references
    Resolution,
    /// Error placeholders or malformed nodes reaching the engine
    ContractViolation,
    /// Reserved or out-of-place builtins
    Unsupported,
    /// The input collaborator could not supply a bit
    Input,
}

/// A failure while executing a statement or evaluating an expression
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    /// A variable or function with this name is already declared
    AlreadyDeclared {
        name: Arc<str>,
        existing: DeclKind,
        span: Span,
    },
    /// A function lists the same formal parameter twice
    DuplicateParameter {
        function: Arc<str>,
        parameter: Arc<str>,
        span: Span,
    },
    /// A program-level name that is not a declared variable
    UndefinedVariable { name: Arc<str>, span: Span },
    /// A plain name inside a function body that is not one of its parameters
    ParameterNotDefined { name: Arc<str>, span: Span },
    /// A reference (`name*`) to a global variable that does not exist
    ReferenceNotDefined { name: Arc<str>, span: Span },
    /// A reference (`name*`) used outside any function body
    ReferenceAtTopLevel { name: Arc<str>, span: Span },
    UndefinedFunction { name: Arc<str>, span: Span },
    /// A call passes the wrong number of arguments
    ArityMismatch {
        name: Arc<str>,
        expected: usize,
        found: usize,
        span: Span,
    },
    /// Nested calls exceeded the configured depth
    RecursionLimit {
        name: Arc<str>,
        limit: usize,
        span: Span,
    },
    /// A builtin received arguments it cannot use
    InvalidArgument {
        builtin: Builtin,
        message: String,
        span: Span,
    },
    /// An error placeholder from the front end was reached
    ErrorNode { message: Arc<str>, span: Span },
    /// A string literal was evaluated as a bit
    StringNotBinary { span: Span },
    /// A function table could not be compiled
    InvalidTable {
        name: Arc<str>,
        message: String,
        span: Span,
    },
    /// `GRAPH`, `EXPORT` or `IMPORT`
    NotSupported { builtin: Builtin, span: Span },
    /// A statement-only builtin used inside an expression
    InvalidBuiltinInExpression { builtin: Builtin, span: Span },
    /// An expression-only builtin used as a statement
    InvalidBuiltinInStatement { builtin: Builtin, span: Span },
    /// A truth table would need more variables than configured
    TableTooLarge {
        variables: usize,
        limit: usize,
        span: Span,
    },
    /// `INPUT` was used but no input source was supplied
    InputUnavailable { prompt: Arc<str>, span: Span },
    /// The input source cancelled the request
    InputCancelled { prompt: Arc<str>, span: Span },
}

impl RuntimeError {
    pub fn class(&self) -> ErrorClass {
        match self {
            RuntimeError::AlreadyDeclared { .. } | RuntimeError::DuplicateParameter { .. } => {
                ErrorClass::DeclarationConflict
            }
            RuntimeError::UndefinedVariable { .. }
            | RuntimeError::ParameterNotDefined { .. }
            | RuntimeError::ReferenceNotDefined { .. }
            | RuntimeError::ReferenceAtTopLevel { .. }
            | RuntimeError::UndefinedFunction { .. }
            | RuntimeError::ArityMismatch { .. }
            | RuntimeError::RecursionLimit { .. }
            | RuntimeError::InvalidArgument { .. } => ErrorClass::Resolution,
            RuntimeError::ErrorNode { .. }
            | RuntimeError::StringNotBinary { .. }
            | RuntimeError::InvalidTable { .. } => ErrorClass::ContractViolation,
            RuntimeError::NotSupported { .. }
            | RuntimeError::InvalidBuiltinInExpression { .. }
            | RuntimeError::InvalidBuiltinInStatement { .. }
            | RuntimeError::TableTooLarge { .. } => ErrorClass::Unsupported,
            RuntimeError::InputUnavailable { .. } | RuntimeError::InputCancelled { .. } => {
                ErrorClass::Input
            }
        }
    }

    /// True only for the reserved, not-yet-implemented builtins
    pub fn is_not_supported(&self) -> bool {
        matches!(self, RuntimeError::NotSupported { .. })
    }

    pub fn span(&self) -> Span {
        match self {
            RuntimeError::AlreadyDeclared { span, .. }
            | RuntimeError::DuplicateParameter { span, .. }
            | RuntimeError::UndefinedVariable { span, .. }
            | RuntimeError::ParameterNotDefined { span, .. }
            | RuntimeError::ReferenceNotDefined { span, .. }
            | RuntimeError::ReferenceAtTopLevel { span, .. }
            | RuntimeError::UndefinedFunction { span, .. }
            | RuntimeError::ArityMismatch { span, .. }
            | RuntimeError::RecursionLimit { span, .. }
            | RuntimeError::InvalidArgument { span, .. }
            | RuntimeError::ErrorNode { span, .. }
            | RuntimeError::StringNotBinary { span }
            | RuntimeError::InvalidTable { span, .. }
            | RuntimeError::NotSupported { span, .. }
            | RuntimeError::InvalidBuiltinInExpression { span, .. }
            | RuntimeError::InvalidBuiltinInStatement { span, .. }
            | RuntimeError::TableTooLarge { span, .. }
            | RuntimeError::InputUnavailable { span, .. }
            | RuntimeError::InputCancelled { span, .. } => *span,
        }
    }
}

impl fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuntimeError::AlreadyDeclared { name, existing, .. } => {
                write!(f, "`{}` is already declared as a {}", name, existing)
            }
            RuntimeError::DuplicateParameter {
                function,
                parameter,
                ..
            } => write!(
                f,
                "parameter `{}` appears more than once in `{}`",
                parameter, function
            ),
            RuntimeError::UndefinedVariable { name, .. } => {
                write!(f, "variable not defined: `{}`", name)
            }
            RuntimeError::ParameterNotDefined { name, .. } => {
                write!(f, "parameter not defined: `{}`", name)
            }
            RuntimeError::ReferenceNotDefined { name, .. } => {
                write!(f, "reference not defined: `{}*`", name)
            }
            RuntimeError::ReferenceAtTopLevel { name, .. } => write!(
                f,
                "reference `{}*` is only meaningful inside a function body",
                name
            ),
            RuntimeError::UndefinedFunction { name, .. } => {
                write!(f, "function not defined: `{}`", name)
            }
            RuntimeError::ArityMismatch {
                name,
                expected,
                found,
                ..
            } => write!(
                f,
                "`{}` expects {} argument(s) but was called with {}",
                name, expected, found
            ),
            RuntimeError::RecursionLimit { name, limit, .. } => write!(
                f,
                "call to `{}` exceeds the maximum call depth of {}",
                name, limit
            ),
            RuntimeError::InvalidArgument {
                builtin, message, ..
            } => write!(f, "invalid argument to {}: {}", builtin, message),
            RuntimeError::ErrorNode { message, .. } => {
                write!(f, "cannot execute malformed code: {}", message)
            }
            RuntimeError::StringNotBinary { .. } => {
                write!(f, "a string literal has no binary value")
            }
            RuntimeError::InvalidTable { name, message, .. } => {
                write!(f, "invalid function table `{}`: {}", name, message)
            }
            RuntimeError::NotSupported { builtin, .. } => {
                write!(f, "{} is not supported yet", builtin)
            }
            RuntimeError::InvalidBuiltinInExpression { builtin, .. } => {
                write!(f, "invalid builtin in expression: {}", builtin)
            }
            RuntimeError::InvalidBuiltinInStatement { builtin, .. } => {
                write!(f, "{} can only be used inside an expression", builtin)
            }
            RuntimeError::TableTooLarge {
                variables, limit, ..
            } => write!(
                f,
                "truth table over {} variables exceeds the limit of {}",
                variables, limit
            ),
            RuntimeError::InputUnavailable { prompt, .. } => {
                write!(f, "no input source available for INPUT({:?})", prompt)
            }
            RuntimeError::InputCancelled { prompt, .. } => {
                write!(f, "input request {:?} was cancelled", prompt)
            }
        }
    }
}

impl std::error::Error for RuntimeError {}

/// The failure that stopped a run
///
/// Carries the index and source text of the failing statement and whatever
/// output the statements before it produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionError {
    /// Zero-based index of the failing statement
    pub index: usize,
    /// The failing statement rendered as source text
    pub statement: String,
    /// Span of the failing statement
    pub statement_span: Span,
    pub error: RuntimeError,
    /// Output produced before the failure
    pub output: Vec<String>,
}

impl fmt::Display for ExecutionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "statement {} failed: {}\n  in: {}",
            self.index + 1,
            self.error,
            self.statement
        )
    }
}

impl std::error::Error for ExecutionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl From<ExecutionError> for io::Error {
    fn from(err: ExecutionError) -> Self {
        io::Error::other(err)
    }
}
