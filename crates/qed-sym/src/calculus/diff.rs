//! Symbolic derivatives on the expression tree.

use crate::expr::{Expr, Func};

/// `d expr / d var`. The result is not simplified.
pub(crate) fn derivative(expr: &Expr, var: &str) -> Expr {
    if !expr.contains_symbol(var) {
        return Expr::zero();
    }
    match expr {
        Expr::Num(_) | Expr::Const(_) => Expr::zero(),
        Expr::Sym(name) => {
            if name == var {
                Expr::one()
            } else {
                Expr::zero()
            }
        }
        Expr::Add(terms) => Expr::Add(terms.iter().map(|term| derivative(term, var)).collect()),
        Expr::Mul(factors) => {
            let mut terms = Vec::with_capacity(factors.len());
            for (index, factor) in factors.iter().enumerate() {
                if !factor.contains_symbol(var) {
                    continue;
                }
                let mut product = factors.clone();
                product[index] = derivative(factor, var);
                terms.push(Expr::Mul(product));
            }
            Expr::Add(terms)
        }
        Expr::Pow(base, exponent) => {
            let base = base.as_ref().clone();
            let exponent = exponent.as_ref().clone();
            let power = base.clone().pow(exponent.clone());
            if !exponent.contains_symbol(var) {
                let lowered = base.clone().pow(exponent.clone() - Expr::one());
                exponent * lowered * derivative(&base, var)
            } else if !base.contains_symbol(var) {
                power * base.ln() * derivative(&exponent, var)
            } else {
                let d_base = derivative(&base, var);
                let d_exponent = derivative(&exponent, var);
                power * (d_exponent * base.clone().ln() + exponent * d_base / base)
            }
        }
        Expr::Func(func, arg) => {
            let inner = arg.as_ref().clone();
            let chain = derivative(&inner, var);
            let outer = match func {
                Func::Exp => inner.exp(),
                Func::Ln => Expr::one() / inner,
                Func::Sqrt => Expr::one() / (Expr::int(2) * inner.sqrt()),
                Func::Sin => inner.cos(),
                Func::Cos => -inner.sin(),
                Func::Tan => Expr::one() / inner.cos().pow(Expr::int(2)),
                Func::Sinh => inner.apply(Func::Cosh),
                Func::Cosh => inner.apply(Func::Sinh),
            };
            outer * chain
        }
    }
}
