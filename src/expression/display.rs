//! Source-text rendering for expressions

use super::{Expr, ExprKind};
use std::fmt;

/// Binding strength of prefix `not`, above every binary operator
const NOT_PRECEDENCE: u8 = 5;

impl Expr {
    /// Format with the minimum precedence the surrounding context accepts
    /// without parentheses
    fn fmt_with_precedence(&self, f: &mut fmt::Formatter<'_>, min: u8) -> fmt::Result {
        match &self.kind {
            ExprKind::Literal(bit) => write!(f, "{}", bit),
            ExprKind::Str(text) => write!(f, "\"{}\"", text),
            ExprKind::Variable { name, reference } => {
                write!(f, "{}", name)?;
                if *reference {
                    write!(f, "*")?;
                }
                Ok(())
            }
            ExprKind::Binary { left, op, right } => {
                let precedence = op.precedence();
                let needs_parens = precedence < min;

                if needs_parens {
                    write!(f, "(")?;
                }

                // Left associative: the right operand needs parens at equal precedence
                left.fmt_with_precedence(f, precedence)?;
                write!(f, " {} ", op)?;
                right.fmt_with_precedence(f, precedence + 1)?;

                if needs_parens {
                    write!(f, ")")?;
                }
                Ok(())
            }
            ExprKind::Not(inner) => {
                write!(f, "not ")?;
                inner.fmt_with_precedence(f, NOT_PRECEDENCE)
            }
            ExprKind::Call { name, args } => {
                write!(f, "{}", name)?;
                fmt_args(f, args)
            }
            ExprKind::Builtin { builtin, params } => {
                write!(f, "{}", builtin)?;
                fmt_args(f, params)
            }
            ExprKind::Error(message) => write!(f, "<error: {}>", message),
        }
    }
}

fn fmt_args(f: &mut fmt::Formatter<'_>, args: &[std::sync::Arc<Expr>]) -> fmt::Result {
    write!(f, "(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        arg.fmt_with_precedence(f, 0)?;
    }
    write!(f, ")")
}

/// Display formatting for expressions
///
/// Renders source text with the minimum parentheses needed to parse back to the
/// same tree.
///
/// # Examples
///
/// ```
/// use bitlogic::expression::Expr;
///
/// let expr = Expr::parse("(A or B) and not (C xor D*)").unwrap();
/// assert_eq!(expr.to_string(), "(A or B) and not (C xor D*)");
///
/// let flat = Expr::parse("((A and B)) or C").unwrap();
/// assert_eq!(flat.to_string(), "A and B or C");
/// ```
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_with_precedence(f, 0)
    }
}
