//! Rewriting expressions over a single universal gate

use crate::expression::{BinaryOp, Expr, ExprKind};
use std::fmt;
use std::sync::Arc;

/// A gate from which every other connective can be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UniversalGate {
    Nand,
    Nor,
}

impl UniversalGate {
    /// The binary operator this gate corresponds to
    pub fn op(self) -> BinaryOp {
        match self {
            UniversalGate::Nand => BinaryOp::Nand,
            UniversalGate::Nor => BinaryOp::Nor,
        }
    }
}

impl fmt::Display for UniversalGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.op())
    }
}

/// Rewrite `expr` so every connective is `gate`
///
/// The result has the same truth table as the input. Calls and builtins are
/// kept as opaque leaves, but their arguments are rewritten.
///
/// ```
/// use bitlogic::expression::{BinaryOp, Expr};
/// use bitlogic::transform::{to_gate_form, UniversalGate};
///
/// let expr = Expr::parse("A or B").unwrap();
/// let nand = to_gate_form(&expr, UniversalGate::Nand);
/// assert_eq!(nand.to_string(), "A nand A nand (B nand B)");
/// assert!(nand.uses_only(BinaryOp::Nand));
/// ```
pub fn to_gate_form(expr: &Arc<Expr>, gate: UniversalGate) -> Arc<Expr> {
    match &expr.kind {
        ExprKind::Literal(_) | ExprKind::Str(_) | ExprKind::Variable { .. } | ExprKind::Error(_) => {
            Arc::clone(expr)
        }
        ExprKind::Not(inner) => invert(to_gate_form(inner, gate), gate),
        ExprKind::Binary { left, op, right } => {
            let a = to_gate_form(left, gate);
            let b = to_gate_form(right, gate);
            match gate {
                UniversalGate::Nand => nand_form(a, *op, b),
                UniversalGate::Nor => nor_form(a, *op, b),
            }
        }
        ExprKind::Call { name, args } => Expr::new(
            ExprKind::Call {
                name: Arc::clone(name),
                args: args.iter().map(|arg| to_gate_form(arg, gate)).collect(),
            },
            expr.span,
        ),
        ExprKind::Builtin { builtin, params } => Expr::new(
            ExprKind::Builtin {
                builtin: *builtin,
                params: params.iter().map(|param| to_gate_form(param, gate)).collect(),
            },
            expr.span,
        ),
    }
}

fn apply(a: Arc<Expr>, gate: UniversalGate, b: Arc<Expr>) -> Arc<Expr> {
    Expr::binary(a, gate.op(), b)
}

/// `x gate x`, which is `not x` for both gates
fn invert(x: Arc<Expr>, gate: UniversalGate) -> Arc<Expr> {
    apply(Arc::clone(&x), gate, x)
}

fn nand_form(a: Arc<Expr>, op: BinaryOp, b: Arc<Expr>) -> Arc<Expr> {
    const G: UniversalGate = UniversalGate::Nand;
    match op {
        BinaryOp::Nand => apply(a, G, b),
        BinaryOp::And => invert(apply(a, G, b), G),
        BinaryOp::Or => apply(invert(a, G), G, invert(b, G)),
        BinaryOp::Nor => invert(nand_form(a, BinaryOp::Or, b), G),
        BinaryOp::Xor => {
            let t = apply(Arc::clone(&a), G, Arc::clone(&b));
            apply(apply(a, G, Arc::clone(&t)), G, apply(b, G, t))
        }
        BinaryOp::Xnor => invert(nand_form(a, BinaryOp::Xor, b), G),
        BinaryOp::Imply => apply(a, G, invert(b, G)),
        BinaryOp::Nimply => invert(nand_form(a, BinaryOp::Imply, b), G),
    }
}

fn nor_form(a: Arc<Expr>, op: BinaryOp, b: Arc<Expr>) -> Arc<Expr> {
    const G: UniversalGate = UniversalGate::Nor;
    match op {
        BinaryOp::Nor => apply(a, G, b),
        BinaryOp::Or => invert(apply(a, G, b), G),
        BinaryOp::And => apply(invert(a, G), G, invert(b, G)),
        BinaryOp::Nand => invert(nor_form(a, BinaryOp::And, b), G),
        BinaryOp::Xnor => {
            let t = apply(Arc::clone(&a), G, Arc::clone(&b));
            apply(apply(a, G, Arc::clone(&t)), G, apply(b, G, t))
        }
        BinaryOp::Xor => invert(nor_form(a, BinaryOp::Xnor, b), G),
        BinaryOp::Nimply => apply(invert(a, G), G, b),
        BinaryOp::Imply => invert(nor_form(a, BinaryOp::Nimply, b), G),
    }
}
