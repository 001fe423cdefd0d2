//! Expression trees for the Boolean language
//!
//! An expression is an immutable tree of [`Expr`] nodes. Children are held behind
//! [`Arc`] so rewriting passes (gate synthesis, inlining, function-table compilation)
//! can share untouched subtrees instead of copying them.
//!
//! Every node carries a [`Span`] into the source it was parsed from. Synthesized
//! nodes combine the spans of their children, so an editor can still point at the
//! right region of a rewritten expression. None of the algorithms look at spans.
//!
//! # Examples
//!
//! ```
//! use bitlogic::expression::{BinaryOp, Expr, Span};
//! use bitlogic::Bit;
//!
//! let a = Expr::variable("A", Span::new(0, 1));
//! let one = Expr::literal(Bit::One, Span::new(6, 7));
//! let expr = Expr::binary(a, BinaryOp::And, one);
//!
//! assert_eq!(expr.to_string(), "A and 1");
//! assert_eq!(expr.span, Span::new(0, 7));
//! ```

mod builtin;
mod display;
pub mod error;
mod operators;
mod parser;

pub use builtin::Builtin;
pub use error::ProgramParseError;
pub use operators::BinaryOp;

use crate::value::Bit;
use std::collections::HashSet;
use std::sync::Arc;

/// Byte range of a node in its source text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Offset of the first byte
    pub start: usize,
    /// Offset one past the last byte
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    /// Smallest span covering both `self` and `other`
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// One-based line and column of `start` within `source`
    pub fn line_col(&self, source: &str) -> (usize, usize) {
        let offset = self.start.min(source.len());
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(newline) => before[newline + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };
        (line, column)
    }
}

/// The shape of an expression node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// A `0` or `1` literal
    Literal(Bit),
    /// A string literal; only meaningful as a builtin argument
    Str(Arc<str>),
    /// A variable reference
    ///
    /// With `reference` set (written `A*`) the name resolves in the global
    /// table even while a function's parameter scope is active.
    Variable { name: Arc<str>, reference: bool },
    /// A binary operation
    Binary {
        left: Arc<Expr>,
        op: BinaryOp,
        right: Arc<Expr>,
    },
    /// Logical NOT, the only unary operator
    Not(Arc<Expr>),
    /// A call to a user-declared function
    Call { name: Arc<str>, args: Vec<Arc<Expr>> },
    /// A builtin used in expression position
    Builtin {
        builtin: Builtin,
        params: Vec<Arc<Expr>>,
    },
    /// Placeholder left by the front end for a malformed expression
    ///
    /// Evaluating one is always a contract violation.
    Error(Arc<str>),
}

/// An expression node with its source span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Arc<Expr> {
        Arc::new(Expr { kind, span })
    }

    pub fn literal(value: Bit, span: Span) -> Arc<Expr> {
        Expr::new(ExprKind::Literal(value), span)
    }

    /// Literal from a bit string as written in source
    ///
    /// Only single-digit strings are valid literals; anything longer becomes an
    /// error placeholder.
    pub fn bits(text: &str, span: Span) -> Arc<Expr> {
        let mut chars = text.chars();
        match (chars.next().and_then(Bit::from_char), chars.next()) {
            (Some(bit), None) => Expr::literal(bit, span),
            _ => Expr::error(
                format!("`{}` is not a binary literal, expected 0 or 1", text),
                span,
            ),
        }
    }

    pub fn string(text: &str, span: Span) -> Arc<Expr> {
        Expr::new(ExprKind::Str(Arc::from(text)), span)
    }

    pub fn variable(name: &str, span: Span) -> Arc<Expr> {
        Expr::new(
            ExprKind::Variable {
                name: Arc::from(name),
                reference: false,
            },
            span,
        )
    }

    /// A reference-marked variable (`name*`)
    pub fn reference(name: &str, span: Span) -> Arc<Expr> {
        Expr::new(
            ExprKind::Variable {
                name: Arc::from(name),
                reference: true,
            },
            span,
        )
    }

    /// Binary node spanning both operands
    pub fn binary(left: Arc<Expr>, op: BinaryOp, right: Arc<Expr>) -> Arc<Expr> {
        let span = left.span.merge(right.span);
        Expr::new(ExprKind::Binary { left, op, right }, span)
    }

    pub fn not(operand: Arc<Expr>, span: Span) -> Arc<Expr> {
        let span = span.merge(operand.span);
        Expr::new(ExprKind::Not(operand), span)
    }

    pub fn call(name: &str, args: Vec<Arc<Expr>>, span: Span) -> Arc<Expr> {
        Expr::new(
            ExprKind::Call {
                name: Arc::from(name),
                args,
            },
            span,
        )
    }

    pub fn builtin(builtin: Builtin, params: Vec<Arc<Expr>>, span: Span) -> Arc<Expr> {
        Expr::new(ExprKind::Builtin { builtin, params }, span)
    }

    pub fn error(message: impl Into<String>, span: Span) -> Arc<Expr> {
        let message: String = message.into();
        Expr::new(ExprKind::Error(Arc::from(message.as_str())), span)
    }

    /// Non-reference variable names in order of first appearance
    ///
    /// These are the inputs of the expression's truth table. Names inside
    /// called functions' bodies are not included; only the call arguments are
    /// walked.
    ///
    /// ```
    /// use bitlogic::expression::Expr;
    ///
    /// let expr = Expr::parse("B and (A or B*) xor F(C, B)").unwrap();
    /// let names: Vec<String> = expr.variables().iter().map(|n| n.to_string()).collect();
    /// assert_eq!(names, vec!["B", "A", "C"]);
    /// ```
    pub fn variables(&self) -> Vec<Arc<str>> {
        let mut seen = HashSet::new();
        let mut names = Vec::new();
        self.collect_variables(&mut seen, &mut names);
        names
    }

    fn collect_variables(&self, seen: &mut HashSet<Arc<str>>, names: &mut Vec<Arc<str>>) {
        match &self.kind {
            ExprKind::Variable {
                name,
                reference: false,
            } => {
                if seen.insert(Arc::clone(name)) {
                    names.push(Arc::clone(name));
                }
            }
            ExprKind::Binary { left, right, .. } => {
                left.collect_variables(seen, names);
                right.collect_variables(seen, names);
            }
            ExprKind::Not(inner) => inner.collect_variables(seen, names),
            ExprKind::Call { args, .. } => {
                for arg in args {
                    arg.collect_variables(seen, names);
                }
            }
            ExprKind::Builtin { params, .. } => {
                for param in params {
                    param.collect_variables(seen, names);
                }
            }
            ExprKind::Variable { .. }
            | ExprKind::Literal(_)
            | ExprKind::Str(_)
            | ExprKind::Error(_) => {}
        }
    }

    /// The first reference variable (`name*`) in the tree and its span
    ///
    /// Like [`variables`](Expr::variables), this does not look inside the
    /// bodies of called functions.
    pub fn first_reference(&self) -> Option<(&Arc<str>, Span)> {
        match &self.kind {
            ExprKind::Variable {
                name,
                reference: true,
            } => Some((name, self.span)),
            ExprKind::Binary { left, right, .. } => left
                .first_reference()
                .or_else(|| right.first_reference()),
            ExprKind::Not(inner) => inner.first_reference(),
            ExprKind::Call { args, .. } => args.iter().find_map(|arg| arg.first_reference()),
            ExprKind::Builtin { params, .. } => {
                params.iter().find_map(|param| param.first_reference())
            }
            ExprKind::Variable { .. }
            | ExprKind::Literal(_)
            | ExprKind::Str(_)
            | ExprKind::Error(_) => None,
        }
    }

    /// True if every binary connective in the tree is `op` and no `Not` remains
    ///
    /// Used to check gate-synthesis results.
    pub fn uses_only(&self, op: BinaryOp) -> bool {
        match &self.kind {
            ExprKind::Binary {
                left,
                op: node_op,
                right,
            } => *node_op == op && left.uses_only(op) && right.uses_only(op),
            ExprKind::Not(_) => false,
            ExprKind::Call { args, .. } => args.iter().all(|arg| arg.uses_only(op)),
            ExprKind::Builtin { params, .. } => params.iter().all(|param| param.uses_only(op)),
            ExprKind::Literal(_)
            | ExprKind::Str(_)
            | ExprKind::Variable { .. }
            | ExprKind::Error(_) => true,
        }
    }

    /// Number of nodes in the tree, counting shared subtrees once per use
    pub fn size(&self) -> usize {
        1 + match &self.kind {
            ExprKind::Binary { left, right, .. } => left.size() + right.size(),
            ExprKind::Not(inner) => inner.size(),
            ExprKind::Call { args, .. } => args.iter().map(|arg| arg.size()).sum(),
            ExprKind::Builtin { params, .. } => params.iter().map(|param| param.size()).sum(),
            ExprKind::Literal(_)
            | ExprKind::Str(_)
            | ExprKind::Variable { .. }
            | ExprKind::Error(_) => 0,
        }
    }
}
