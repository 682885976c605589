//! Term-wise antiderivatives over the normal form.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;

use crate::error::SymbolicError;
use crate::expr::{Interval, LimitPoint};
use crate::normal::numeric::approx_rat;
use crate::normal::{Atom, Monomial, Poly, Rat};

/// Coefficient `a` when `poly == a * var` with `a` free of `var`.
pub(crate) fn linear_coefficient(poly: &Poly, var: &str) -> Option<Poly> {
    let symbol = Atom::Symbol(var.to_string());
    let mut coefficient = Poly::zero();
    for (mono, coeff) in &poly.terms {
        if mono.count(&symbol) != 1 {
            return None;
        }
        let mut rest = mono.clone();
        rest.factors.remove(&symbol);
        if rest.mentions(var) {
            return None;
        }
        coefficient.insert(rest, coeff.clone());
    }
    Some(coefficient)
}

/// Shape of the `var`-dependent part of one monomial.
struct TermShape {
    degree: i64,
    logarithm: bool,
    rate: Option<Poly>,
}

fn shape(dependent: &Monomial, var: &str) -> Result<TermShape, SymbolicError> {
    let symbol = Atom::Symbol(var.to_string());
    let log_of_var = Atom::Ln(Box::new(Rat::from_atom(symbol.clone())));
    let mut degree = 0;
    let mut logarithm = false;
    for (atom, count) in &dependent.factors {
        if *atom == symbol {
            degree = *count;
        } else if *atom == log_of_var && *count == 1 {
            logarithm = true;
        } else {
            return Err(SymbolicError::Unsupported(format!(
                "integrand factor {} in {var}",
                Rat::from_poly(Poly::from_atom(atom.clone())).to_expr()
            )));
        }
    }
    let rate = if dependent.exp.is_zero() {
        None
    } else {
        Some(linear_coefficient(&dependent.exp, var).ok_or_else(|| {
            SymbolicError::Unsupported(format!("exponential that is not linear in {var}"))
        })?)
    };
    Ok(TermShape {
        degree,
        logarithm,
        rate,
    })
}

fn power_of(var: &str, degree: i64) -> Rat {
    Rat::from_poly(Poly::term(
        Monomial::atom(Atom::Symbol(var.to_string()), degree),
        BigRational::one(),
    ))
}

fn ratio(numer: i64, denom: i64) -> BigRational {
    BigRational::new(BigInt::from(numer), BigInt::from(denom))
}

fn integrate_shape(shape: &TermShape, var: &str, max: u32) -> Result<Rat, SymbolicError> {
    let k = shape.degree;
    match (&shape.rate, shape.logarithm) {
        (None, false) if k == -1 => Rat::from_atom(Atom::Symbol(var.to_string())).ln(max),
        (None, false) => Ok(power_of(var, k + 1).scale(&ratio(1, k + 1))),
        (None, true) if k == -1 => {
            let log = Rat::from_atom(Atom::Symbol(var.to_string())).ln(max)?;
            Ok(log.mul(&log)?.scale(&ratio(1, 2)))
        }
        (None, true) => {
            let log = Rat::from_atom(Atom::Symbol(var.to_string())).ln(max)?;
            let lifted = power_of(var, k + 1);
            let first = lifted.mul(&log)?.scale(&ratio(1, k + 1));
            let second = lifted.scale(&ratio(1, (k + 1) * (k + 1)));
            first.sub(&second)
        }
        (Some(rate), false) if k >= 0 => {
            if k > i64::from(max) {
                return Err(SymbolicError::TooLarge(format!("{var}^{k} under an exponential")));
            }
            let rate = Rat::from_poly(rate.clone());
            let exponential = Rat::from_poly(Poly::term(
                Monomial::exponential(linear_term(&rate.num, var)),
                BigRational::one(),
            ));
            let mut sum = Rat::zero();
            let mut falling = BigRational::one();
            for j in 0..=k {
                let sign = if j % 2 == 0 { 1 } else { -1 };
                let term = power_of(var, k - j)
                    .div(&rate.pow_int(j + 1, max)?)?
                    .scale(&(falling.clone() * BigRational::from_integer(BigInt::from(sign))));
                sum = sum.add(&term)?;
                falling *= BigRational::from_integer(BigInt::from(k - j));
            }
            exponential.mul(&sum)
        }
        _ => Err(SymbolicError::Unsupported(format!(
            "integrand shape {var}^{k} with logarithm and exponential"
        ))),
    }
}

fn linear_term(rate: &Poly, var: &str) -> Poly {
    let symbol = Atom::Symbol(var.to_string());
    let mut out = Poly::zero();
    for (mono, coeff) in &rate.terms {
        let mut lifted = mono.clone();
        *lifted.factors.entry(symbol.clone()).or_insert(0) += 1;
        out.insert(lifted, coeff.clone());
    }
    out
}

/// An antiderivative of `rat` with respect to `var`, without a constant.
pub(crate) fn antiderivative(rat: &Rat, var: &str, max: u32) -> Result<Rat, SymbolicError> {
    if rat.den.mentions(var) {
        return Err(SymbolicError::Unsupported(format!(
            "rational function of {var} in the denominator"
        )));
    }
    let mut total = Rat::zero();
    for (mono, coeff) in &rat.num.terms {
        let (dependent, free) = mono.split(var);
        let piece = integrate_shape(&shape(&dependent, var)?, var, max)?;
        let factor = Rat::from_poly(Poly::term(free, coeff.clone()));
        total = total.add(&factor.mul(&piece)?)?;
    }
    total.div(&Rat::from_poly(rat.den.clone()))
}

/// Where a bound sits relative to the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Negative,
    Origin,
    Positive,
}

fn side_of(point: &LimitPoint, max: u32) -> Result<Side, SymbolicError> {
    let at = match point {
        LimitPoint::PosInfinity => return Ok(Side::Positive),
        LimitPoint::NegInfinity => return Ok(Side::Negative),
        LimitPoint::Finite(at) => at,
    };
    let rat = Rat::from_expr(at, max)?;
    if rat.is_zero() {
        return Ok(Side::Origin);
    }
    let undecided = || SymbolicError::Unsupported(format!("cannot place bound {at} relative to 0"));
    if rat.has_symbols() {
        return Err(undecided());
    }
    let value = approx_rat(&rat).filter(|value| value.is_finite()).ok_or_else(undecided)?;
    if value.im.abs() > 1e-12 * value.re.abs().max(1.0) {
        return Err(SymbolicError::Unsupported(format!("bound {at} is not real")));
    }
    Ok(if value.re < 0.0 { Side::Negative } else { Side::Positive })
}

/// Rejects intervals over which the term-wise antiderivative is not valid.
///
/// Every integrand `antiderivative` accepts is smooth away from `var = 0`, so
/// the only singularities are negative powers of `var` (a pole at the origin)
/// and `ln(var)`, which is real only for positive `var`. A pole on the closed
/// interval makes the integral divergent; a logarithm over negative values is
/// left undecided.
pub(crate) fn check_interval(
    integrand: &Rat,
    var: &str,
    interval: &Interval,
    max: u32,
) -> Result<(), SymbolicError> {
    let symbol = Atom::Symbol(var.to_string());
    let mut pole = false;
    let mut logarithm = false;
    for mono in integrand.num.terms.keys() {
        let (dependent, _) = mono.split(var);
        let degree = dependent.count(&symbol);
        pole |= degree < 0;
        logarithm |= degree == -1 || dependent.factors.keys().any(|atom| *atom != symbol);
    }
    if !pole && !logarithm {
        return Ok(());
    }
    let sides = [side_of(&interval.lower, max)?, side_of(&interval.upper, max)?];
    let spans_origin = !(sides.iter().all(|side| *side == Side::Positive)
        || sides.iter().all(|side| *side == Side::Negative));
    if pole && spans_origin {
        return Err(SymbolicError::Divergent(format!(
            "{} has a pole at {var} = 0 within [{}, {}]",
            integrand.to_expr(),
            interval.lower,
            interval.upper
        )));
    }
    if logarithm && sides.contains(&Side::Negative) {
        return Err(SymbolicError::Unsupported(format!(
            "ln({var}) is not real on [{}, {}]",
            interval.lower, interval.upper
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    fn integral(text: &str) -> Expr {
        let rat = Rat::from_expr(&Expr::parse(text).expect("parse"), 64).expect("normalise");
        antiderivative(&rat, "x", 64).expect("integrate").to_expr()
    }

    #[test]
    fn power_rule() {
        assert_eq!(integral("2*x").to_string(), "x^2");
    }

    #[test]
    fn reciprocal_gives_logarithm() {
        assert_eq!(integral("1/x").to_string(), "ln(x)");
    }

    fn interval_check(text: &str, lower: i64, upper: i64) -> Result<(), SymbolicError> {
        let rat = Rat::from_expr(&Expr::parse(text).expect("parse"), 64).expect("normalise");
        check_interval(&rat, "x", &Interval::new(Expr::int(lower), Expr::int(upper)), 64)
    }

    #[test]
    fn pole_inside_interval_is_divergent() {
        assert!(matches!(interval_check("1/x^2", -1, 1), Err(SymbolicError::Divergent(_))));
        assert!(matches!(interval_check("1/x", 0, 1), Err(SymbolicError::Divergent(_))));
        assert!(interval_check("1/x^2", 1, 2).is_ok());
        assert!(interval_check("x^2", -1, 1).is_ok());
    }

    #[test]
    fn logarithm_over_negative_values_is_undecided() {
        assert!(matches!(interval_check("ln(x)", -2, -1), Err(SymbolicError::Unsupported(_))));
        assert!(matches!(interval_check("1/x", -2, -1), Err(SymbolicError::Unsupported(_))));
        assert!(interval_check("ln(x)", 1, 2).is_ok());
    }

    #[test]
    fn rational_denominator_is_unsupported() {
        let rat = Rat::from_expr(&Expr::parse("1/(x + 1)").expect("parse"), 64).expect("normalise");
        assert!(matches!(
            antiderivative(&rat, "x", 64),
            Err(SymbolicError::Unsupported(_))
        ));
    }
}
