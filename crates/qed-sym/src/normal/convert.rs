//! Conversion between expression trees and the normal form.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use super::{Atom, Monomial, Poly, Rat};
use crate::error::SymbolicError;
use crate::expr::{Constant, Expr, Func};

impl Rat {
    /// Normalises an expression tree.
    pub(crate) fn from_expr(expr: &Expr, max: u32) -> Result<Rat, SymbolicError> {
        match expr {
            Expr::Num(value) => Ok(Rat::constant(value.clone())),
            Expr::Sym(name) => Ok(Rat::from_atom(Atom::Symbol(name.clone()))),
            Expr::Const(Constant::Pi) => Ok(Rat::from_atom(Atom::Pi)),
            Expr::Const(Constant::I) => Ok(Rat::from_atom(Atom::I)),
            Expr::Const(Constant::E) => Ok(Rat::from_poly(Poly::term(
                Monomial::exponential(Poly::one()),
                BigRational::one(),
            ))),
            Expr::Add(terms) => terms.iter().try_fold(Rat::zero(), |acc, term| {
                acc.add(&Rat::from_expr(term, max)?)
            }),
            Expr::Mul(factors) => factors.iter().try_fold(Rat::one(), |acc, factor| {
                acc.mul(&Rat::from_expr(factor, max)?)
            }),
            Expr::Pow(base, exponent) => {
                let base = Rat::from_expr(base, max)?;
                let exponent = Rat::from_expr(exponent, max)?;
                base.pow(&exponent, max)
            }
            Expr::Func(func, arg) => {
                let arg = Rat::from_expr(arg, max)?;
                apply(*func, &arg, max)
            }
        }
    }

    /// Renders the normal form back into an expression tree.
    pub(crate) fn to_expr(&self) -> Expr {
        let num = poly_expr(&self.num);
        if self.den.is_one() {
            return num;
        }
        let den = Expr::Pow(Box::new(poly_expr(&self.den)), Box::new(Expr::int(-1)));
        match num {
            Expr::Mul(mut factors) => {
                factors.push(den);
                Expr::Mul(factors)
            }
            other if other.as_rational().map(|value| value.is_one()) == Some(true) => den,
            other => Expr::Mul(vec![other, den]),
        }
    }
}

fn apply(func: Func, arg: &Rat, max: u32) -> Result<Rat, SymbolicError> {
    let i = Rat::from_atom(Atom::I);
    let half = Rat::constant(BigRational::new(BigInt::one(), BigInt::from(2)));
    match func {
        Func::Exp => arg.exp(max),
        Func::Ln => arg.ln(max),
        Func::Sqrt => arg.root(2),
        Func::Sin => {
            let turned = i.mul(arg)?;
            let diff = turned.exp(max)?.sub(&turned.neg().exp(max)?)?;
            diff.mul(&i.neg())?.mul(&half)
        }
        Func::Cos => {
            let turned = i.mul(arg)?;
            let sum = turned.exp(max)?.add(&turned.neg().exp(max)?)?;
            sum.mul(&half)
        }
        Func::Tan => {
            let sin = apply(Func::Sin, arg, max)?;
            let cos = apply(Func::Cos, arg, max)?;
            if cos.is_zero() {
                return Err(SymbolicError::division_by_zero("tangent at an odd multiple of pi/2"));
            }
            sin.div(&cos)
        }
        Func::Sinh => arg.exp(max)?.sub(&arg.neg().exp(max)?)?.mul(&half),
        Func::Cosh => arg.exp(max)?.add(&arg.neg().exp(max)?)?.mul(&half),
    }
}

pub(crate) fn poly_expr(poly: &Poly) -> Expr {
    let mut terms: Vec<Expr> = poly
        .terms
        .iter()
        .map(|(mono, coeff)| term_expr(mono, coeff))
        .collect();
    match terms.len() {
        0 => Expr::zero(),
        1 => terms.remove(0),
        _ => Expr::Add(terms),
    }
}

fn term_expr(mono: &Monomial, coeff: &BigRational) -> Expr {
    let mut factors = Vec::new();
    if !coeff.is_one() || mono.is_one() {
        factors.push(Expr::Num(coeff.clone()));
    }
    for (atom, count) in &mono.factors {
        let base = atom_expr(atom);
        if *count == 1 {
            factors.push(base);
        } else {
            factors.push(Expr::Pow(Box::new(base), Box::new(Expr::int(*count))));
        }
    }
    if !mono.exp.is_zero() {
        if mono.exp.is_one() {
            factors.push(Expr::Const(Constant::E));
        } else {
            factors.push(Expr::Func(Func::Exp, Box::new(poly_expr(&mono.exp))));
        }
    }
    match factors.len() {
        1 => factors.remove(0),
        _ => Expr::Mul(factors),
    }
}

fn atom_expr(atom: &Atom) -> Expr {
    match atom {
        Atom::Symbol(name) => Expr::Sym(name.clone()),
        Atom::Pi => Expr::Const(Constant::Pi),
        Atom::I => Expr::Const(Constant::I),
        Atom::Root { radicand, index: 2 } => {
            Expr::Func(Func::Sqrt, Box::new(poly_expr(radicand)))
        }
        Atom::Root { radicand, index } => Expr::Pow(
            Box::new(poly_expr(radicand)),
            Box::new(Expr::Num(BigRational::new(
                BigInt::one(),
                BigInt::from(*index),
            ))),
        ),
        Atom::Ln(arg) => Expr::Func(Func::Ln, Box::new(arg.to_expr())),
        Atom::Exp(arg) => Expr::Func(Func::Exp, Box::new(arg.to_expr())),
        Atom::Power { base, exponent } => {
            Expr::Pow(Box::new(base.to_expr()), Box::new(exponent.to_expr()))
        }
    }
}
