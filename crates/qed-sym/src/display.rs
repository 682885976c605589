use std::fmt::{self, Display, Write};

use num_rational::BigRational;
use num_traits::{One, Signed, Zero};

use crate::expr::{Constant, Expr};

fn write_rational(out: &mut String, value: &BigRational) {
    if value.is_integer() {
        let _ = write!(out, "{}", value.numer());
    } else {
        let _ = write!(out, "{}/{}", value.numer(), value.denom());
    }
}

fn is_atomic(expr: &Expr) -> bool {
    match expr {
        Expr::Sym(_) | Expr::Const(_) | Expr::Func(_, _) => true,
        Expr::Num(value) => value.is_integer() && !value.is_negative(),
        _ => false,
    }
}

fn write_grouped(out: &mut String, expr: &Expr) {
    if is_atomic(expr) {
        write_expr(out, expr);
    } else {
        out.push('(');
        write_expr(out, expr);
        out.push(')');
    }
}

fn write_power(out: &mut String, base: &Expr, exponent: &BigRational) {
    write_grouped(out, base);
    if !exponent.is_one() {
        out.push('^');
        if exponent.is_integer() && exponent.is_positive() {
            write_rational(out, exponent);
        } else {
            out.push('(');
            write_rational(out, exponent);
            out.push(')');
        }
    }
}

fn write_product(out: &mut String, items: &[Expr]) {
    let mut coeff = BigRational::one();
    let mut numer: Vec<&Expr> = Vec::new();
    let mut denom: Vec<(&Expr, BigRational)> = Vec::new();
    for item in items {
        match item {
            Expr::Num(value) => coeff *= value,
            Expr::Pow(base, exponent) => match exponent.as_ref() {
                Expr::Num(value) if value.is_negative() => denom.push((base, -value.clone())),
                _ => numer.push(item),
            },
            other => numer.push(other),
        }
    }
    if coeff.is_zero() {
        out.push('0');
        return;
    }
    if coeff.is_negative() {
        out.push('-');
        coeff = -coeff;
    }
    let mut wrote = false;
    if !coeff.numer().is_one() || numer.is_empty() {
        let _ = write!(out, "{}", coeff.numer());
        wrote = true;
    }
    for factor in numer {
        if wrote {
            out.push('*');
        }
        match factor {
            Expr::Pow(_, _) => write_expr(out, factor),
            other => write_grouped(out, other),
        }
        wrote = true;
    }
    let denom_count = denom.len() + usize::from(!coeff.denom().is_one());
    if denom_count == 0 {
        return;
    }
    out.push('/');
    if denom_count > 1 {
        out.push('(');
    }
    let mut first = true;
    if !coeff.denom().is_one() {
        let _ = write!(out, "{}", coeff.denom());
        first = false;
    }
    for (base, exponent) in denom {
        if !first {
            out.push('*');
        }
        write_power(out, base, &exponent);
        first = false;
    }
    if denom_count > 1 {
        out.push(')');
    }
}

fn write_expr(out: &mut String, expr: &Expr) {
    match expr {
        Expr::Num(value) => write_rational(out, value),
        Expr::Sym(name) => out.push_str(name),
        Expr::Const(Constant::Pi) => out.push_str("pi"),
        Expr::Const(Constant::E) => out.push('E'),
        Expr::Const(Constant::I) => out.push('I'),
        Expr::Add(items) => {
            if items.is_empty() {
                out.push('0');
                return;
            }
            for (idx, item) in items.iter().enumerate() {
                let mut term = String::new();
                write_expr(&mut term, item);
                if idx == 0 {
                    out.push_str(&term);
                } else if let Some(rest) = term.strip_prefix('-') {
                    out.push_str(" - ");
                    out.push_str(rest);
                } else {
                    out.push_str(" + ");
                    out.push_str(&term);
                }
            }
        }
        Expr::Mul(items) => {
            if items.is_empty() {
                out.push('1');
            } else {
                write_product(out, items);
            }
        }
        Expr::Pow(base, exponent) => match exponent.as_ref() {
            Expr::Num(value) if value.is_negative() => {
                out.push_str("1/");
                write_power(out, base, &-value.clone());
            }
            Expr::Num(value) => write_power(out, base, value),
            other => {
                write_grouped(out, base);
                out.push('^');
                write_grouped(out, other);
            }
        },
        Expr::Func(func, arg) => {
            out.push_str(func.name());
            out.push('(');
            write_expr(out, arg);
            out.push(')');
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        write_expr(&mut out, self);
        f.write_str(&out)
    }
}
