//! Parsing support for programs and expressions

use super::error::ProgramParseError;
use super::{Expr, Span};
use crate::program::Program;
use lalrpop_util::ParseError;
use std::fmt;
use std::sync::Arc;

// Lalrpop-generated parser module (generated in OUT_DIR at build time)
#[allow(clippy::all)]
mod parser_impl {
    #![allow(clippy::all)]
    #![allow(dead_code)]
    #![allow(unused_variables)]
    #![allow(unused_imports)]
    #![allow(non_snake_case)]
    #![allow(non_camel_case_types)]
    #![allow(non_upper_case_globals)]
    include!(concat!(env!("OUT_DIR"), "/expression/grammar.rs"));
}

impl Program {
    /// Parse a whole program
    ///
    /// Syntax errors fail the parse. Malformed constructs that still fit the
    /// grammar (a multi-digit literal, subparameters on an algebraic function)
    /// become error placeholders, which the engine rejects when it reaches them.
    ///
    /// ```
    /// use bitlogic::Program;
    ///
    /// let program = Program::parse("A = 1;\nF(X) = X and A*;\nPRINT(F(0));").unwrap();
    /// assert_eq!(program.len(), 3);
    /// ```
    pub fn parse(source: &str) -> Result<Program, ProgramParseError> {
        parser_impl::ProgramParser::new()
            .parse(source)
            .map(Program::new)
            .map_err(|e| convert_error(source, e))
    }
}

impl Expr {
    /// Parse a single expression
    pub fn parse(source: &str) -> Result<Arc<Expr>, ProgramParseError> {
        parser_impl::ExpressionParser::new()
            .parse(source)
            .map_err(|e| convert_error(source, e))
    }
}

/// Translate a lalrpop error, attaching line and column from the source
fn convert_error<T, E>(source: &str, err: ParseError<usize, T, E>) -> ProgramParseError
where
    T: fmt::Display,
    E: fmt::Display,
{
    let offset = match &err {
        ParseError::InvalidToken { location } => Some(*location),
        ParseError::UnrecognizedEof { location, .. } => Some(*location),
        ParseError::UnrecognizedToken {
            token: (start, _, _),
            ..
        } => Some(*start),
        ParseError::ExtraToken {
            token: (start, _, _),
        } => Some(*start),
        ParseError::User { .. } => None,
    };
    let location = offset.map(|offset| Span::new(offset, offset).line_col(source));
    let message = err.to_string();
    ProgramParseError::InvalidSyntax {
        message: Arc::from(message.as_str()),
        offset,
        location,
    }
}
