//! Error types for the crate's entry points
//!
//! Each stage has its own error type: [`ProgramParseError`] for syntax,
//! [`ExecutionError`] for a failed run. [`LogicError`] wraps them, together with
//! I/O failures from reading program files, so callers of
//! [`run_source`](crate::run_source) and [`run_file`](crate::run_file) handle a
//! single type.

use crate::engine::{ExecutionError, RuntimeError};
use crate::expression::ProgramParseError;
use std::fmt;
use std::io;

/// The main error type for parsing and running programs
#[derive(Debug)]
pub enum LogicError {
    /// The program text does not parse
    Parse(ProgramParseError),

    /// A statement failed at run time
    ///
    /// The wrapped error holds the failing statement and the output produced
    /// before it.
    Execution(ExecutionError),

    /// IO error wrapper
    ///
    /// Wraps standard IO errors that occur while reading program files.
    Io(io::Error),
}

impl LogicError {
    /// The runtime error behind an execution failure
    pub fn runtime_error(&self) -> Option<&RuntimeError> {
        match self {
            LogicError::Execution(err) => Some(&err.error),
            _ => None,
        }
    }

    /// Output produced before the failure; empty unless execution started
    pub fn partial_output(&self) -> &[String] {
        match self {
            LogicError::Execution(err) => &err.output,
            _ => &[],
        }
    }
}

impl fmt::Display for LogicError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogicError::Parse(err) => write!(f, "{}", err),
            LogicError::Execution(err) => write!(f, "{}", err),
            LogicError::Io(err) => write!(f, "{}", err),
        }
    }
}

impl std::error::Error for LogicError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LogicError::Parse(err) => Some(err),
            LogicError::Execution(err) => Some(err),
            LogicError::Io(err) => Some(err),
        }
    }
}

impl From<ProgramParseError> for LogicError {
    fn from(err: ProgramParseError) -> Self {
        LogicError::Parse(err)
    }
}

impl From<ExecutionError> for LogicError {
    fn from(err: ExecutionError) -> Self {
        LogicError::Execution(err)
    }
}

impl From<io::Error> for LogicError {
    fn from(err: io::Error) -> Self {
        LogicError::Io(err)
    }
}

// Conversion from LogicError to io::Error so `?` works in io::Result code
impl From<LogicError> for io::Error {
    fn from(err: LogicError) -> Self {
        match err {
            LogicError::Io(io_err) => io_err,
            LogicError::Parse(parse_err) => parse_err.into(),
            LogicError::Execution(exec_err) => exec_err.into(),
        }
    }
}
