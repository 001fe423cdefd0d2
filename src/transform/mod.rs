//! Structural rewrites of expressions and declarations
//!
//! - [`to_gate_form`] re-expresses an expression over a single universal gate
//!   (NAND or NOR) without changing its truth table.
//! - [`compile_table`] turns a function table into an ordinary algebraic
//!   function declaration.
//!
//! Both are pure: they build new trees and share untouched subtrees with the
//! input.

mod gates;
mod table;

pub use gates::{to_gate_form, UniversalGate};
pub use table::compile_table;
