//! Error types for parsing programs and expressions

use std::fmt;
use std::io;
use std::sync::Arc;

/// Errors raised by the front end when source text is not well formed
///
/// Semantic problems are not reported here: the parser leaves error placeholder
/// nodes in the tree and the engine rejects them when it reaches them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramParseError {
    /// The source does not match the grammar
    InvalidSyntax {
        /// The error message from the parser
        message: Arc<str>,
        /// Byte offset of the offending token, if known
        offset: Option<usize>,
        /// One-based line and column derived from `offset`
        location: Option<(usize, usize)>,
    },
}

impl ProgramParseError {
    pub fn offset(&self) -> Option<usize> {
        match self {
            ProgramParseError::InvalidSyntax { offset, .. } => *offset,
        }
    }

    pub fn location(&self) -> Option<(usize, usize)> {
        match self {
            ProgramParseError::InvalidSyntax { location, .. } => *location,
        }
    }
}

impl fmt::Display for ProgramParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramParseError::InvalidSyntax {
                message, location, ..
            } => {
                if let Some((line, column)) = location {
                    write!(
                        f,
                        "Failed to parse program at line {}, column {}: {}",
                        line, column, message
                    )
                } else {
                    write!(f, "Failed to parse program: {}", message)
                }
            }
        }
    }
}

impl std::error::Error for ProgramParseError {}

impl From<ProgramParseError> for io::Error {
    fn from(err: ProgramParseError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, err)
    }
}
