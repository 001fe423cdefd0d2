//! # bitlogic
//!
//! An interpreter and logic-synthesis engine for a small Boolean language.
//! Variables and functions take the values 0 and 1; functions are written
//! either algebraically or as truth tables, and builtins print, display,
//! tabulate and resynthesize expressions.
//!
//! ## Overview
//!
//! ```text
//! // Comments run to the end of the line
//! A = 1;
//! B = not A or 0;
//! F(X, Y) = X and Y*;                      // Y* reads the global Y
//! G(X, Y : S) = table { 00: 0; 01: S; 10: S; 11: 1; }
//! PRINT("value", F(1, 0));
//! SHOW(TO_NAND(A xor B));
//! TABLE(A imply B);
//! ```
//!
//! The pieces are:
//!
//! - [`Program::parse`] turns source text into a statement list
//! - [`Executor`] runs the statements in order and collects output units
//! - [`transform`] rewrites expressions over NAND or NOR and compiles
//!   function tables
//! - [`cover`] finds minimal sum-of-products and product-of-sums forms with
//!   Quine-McCluskey and Petrick's method
//! - [`TruthTable`] enumerates and renders an expression's truth table
//!
//! ## Running Programs
//!
//! ```
//! use bitlogic::{run_source, EngineConfig};
//!
//! # fn main() -> Result<(), bitlogic::LogicError> {
//! let output = run_source(
//!     "A = 1;
//!      B = 0;
//!      PRINT(\"A xor B =\", A xor B);
//!      SHOW(SOLVE_SOP(X and Y or X and not Y));",
//!     EngineConfig::default(),
//! )?;
//!
//! assert_eq!(output, vec!["A xor B = 1", "X"]);
//! # Ok(())
//! # }
//! ```
//!
//! Every `PRINT`, `SHOW` or `TABLE` statement produces exactly one unit of
//! output. A `TABLE` unit spans several lines.
//!
//! ## Errors
//!
//! Execution stops at the first failing statement. The error names the
//! statement and keeps the output produced before it:
//!
//! ```
//! use bitlogic::{run_source, EngineConfig, LogicError};
//!
//! let err = run_source("PRINT(1); PRINT(Q);", EngineConfig::default()).unwrap_err();
//! assert!(matches!(err, LogicError::Execution(_)));
//! assert_eq!(err.partial_output(), &["1".to_string()]);
//! ```
//!
//! ## Input
//!
//! `INPUT` asks an [`InputSource`](engine::InputSource) for a bit and blocks
//! until it answers. Without a source every request fails. A closure works
//! as a source:
//!
//! ```
//! use bitlogic::engine::{Executor, FnInput};
//! use bitlogic::{Bit, EngineConfig, Program};
//!
//! let program = Program::parse("A = INPUT(\"A?\"); PRINT(not A);").unwrap();
//! let input = FnInput::new(|_prompt: &str| Some(Bit::One));
//! let mut executor = Executor::with_input(EngineConfig::default(), input);
//! assert_eq!(executor.run(&program).unwrap(), vec!["0"]);
//! ```
//!
//! [`ChannelInput`](engine::ChannelInput) answers from another thread, which
//! is how an interactive front end keeps its UI responsive while a run waits.

// Public modules
pub mod cover;
pub mod engine;
pub mod error;
pub mod expression;
pub mod program;
pub mod transform;
pub mod truth_table;
pub mod value;

// Re-export high-level public API
pub use cover::{Cover, Minimizable, TwoLevelForm};
pub use engine::{ExecutionError, Executor, RuntimeError};
pub use error::LogicError;
pub use expression::{BinaryOp, Builtin, Expr, ProgramParseError, Span};
pub use program::{Program, Statement};
pub use truth_table::TruthTable;
pub use value::Bit;

use std::fs;
use std::path::Path;

/// Configuration for the execution engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Deepest allowed nesting of function calls
    pub max_call_depth: usize,
    /// Most variables `TABLE`, `SOLVE_SOP` and `SOLVE_POS` will enumerate
    pub max_table_variables: usize,
    /// Let `SHOW` replace user function calls with their bodies
    pub inline_calls: bool,
    /// Text placed between `PRINT` arguments
    pub print_separator: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            max_call_depth: 256,
            max_table_variables: 16,
            inline_calls: false,
            print_separator: " ".to_string(),
        }
    }
}

impl EngineConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// Parse and run a program, returning its output units
pub fn run_source(source: &str, config: EngineConfig) -> Result<Vec<String>, LogicError> {
    let program = Program::parse(source)?;
    log::debug!("Parsed {} statement(s)", program.len());
    let mut executor = Executor::new(config);
    Ok(executor.run(&program)?)
}

/// Read a program from `path` and run it
pub fn run_file<P: AsRef<Path>>(path: P, config: EngineConfig) -> Result<Vec<String>, LogicError> {
    let source = fs::read_to_string(path)?;
    run_source(&source, config)
}
