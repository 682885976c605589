//! Limits of normal forms.
//!
//! Finite points are handled by substitution into numerator and denominator
//! separately, falling back to L'Hôpital's rule on `0/0`. Infinite points
//! compare the dominant growth of both sides: exponential rate first, then
//! polynomial degree, then powers of logarithms.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};

use super::diff::derivative;
use super::integrate::linear_coefficient;
use crate::error::SymbolicError;
use crate::expr::{Expr, LimitPoint};
use crate::normal::{numeric, Atom, Monomial, Poly, Rat};

const RATE_TOLERANCE: f64 = 1e-12;

/// Knobs shared by the limit routines.
#[derive(Debug, Clone, Copy)]
pub(crate) struct LimitSettings {
    pub(crate) max_power: u32,
    pub(crate) lhopital_depth: u32,
}

pub(crate) fn limit(
    rat: &Rat,
    var: &str,
    point: &LimitPoint,
    settings: LimitSettings,
) -> Result<Rat, SymbolicError> {
    if !rat.mentions(var) {
        return Ok(rat.clone());
    }
    match point {
        LimitPoint::Finite(at) => finite(rat, var, at, settings, 0),
        LimitPoint::PosInfinity => infinite(rat, var, rat, point),
        LimitPoint::NegInfinity => {
            let flipped = rat.to_expr().substitute(var, &-Expr::sym(var));
            infinite(&Rat::from_expr(&flipped, settings.max_power)?, var, rat, point)
        }
    }
}

fn evaluate(poly: &Poly, var: &str, at: &Expr, max: u32) -> Result<Rat, SymbolicError> {
    let expr = Rat::from_poly(poly.clone()).to_expr().substitute(var, at);
    Rat::from_expr(&expr, max)
}

fn differentiate(poly: &Poly, var: &str, max: u32) -> Result<Rat, SymbolicError> {
    let expr = Rat::from_poly(poly.clone()).to_expr();
    Rat::from_expr(&derivative(&expr, var), max)
}

fn finite(
    rat: &Rat,
    var: &str,
    at: &Expr,
    settings: LimitSettings,
    depth: u32,
) -> Result<Rat, SymbolicError> {
    if !rat.mentions(var) {
        return Ok(rat.clone());
    }
    let symbol = Atom::Symbol(var.to_string());
    let lowest = rat
        .num
        .terms
        .keys()
        .chain(rat.den.terms.keys())
        .map(|mono| mono.count(&symbol))
        .min()
        .unwrap_or(0)
        .min(0);
    let lift = Monomial::atom(symbol, -lowest);
    let num = rat.num.shift(&lift)?;
    let den = rat.den.shift(&lift)?;

    let max = settings.max_power;
    let top = evaluate(&num, var, at, max)?;
    let bottom = evaluate(&den, var, at, max)?;
    if !bottom.is_zero() {
        return top.div(&bottom);
    }
    if !top.is_zero() {
        return Err(SymbolicError::Divergent(format!(
            "{} / 0 as {var} -> {at}",
            top.to_expr()
        )));
    }
    if depth >= settings.lhopital_depth {
        return Err(SymbolicError::Indeterminate(format!(
            "0/0 as {var} -> {at} after {depth} rounds of L'Hopital"
        )));
    }
    tracing::trace!(var, depth, "applying L'Hopital");
    let next = differentiate(&num, var, max)?.div(&differentiate(&den, var, max)?)?;
    finite(&next, var, at, settings, depth + 1)
}

/// Asymptotic size of a term as the variable tends to `+oo`.
#[derive(Debug, Clone, PartialEq)]
struct Growth {
    rate: f64,
    degree: BigRational,
    log: BigRational,
}

impl Growth {
    fn flat() -> Self {
        Growth {
            rate: 0.0,
            degree: BigRational::zero(),
            log: BigRational::zero(),
        }
    }

    fn compare(&self, other: &Growth) -> Ordering {
        if (self.rate - other.rate).abs() > RATE_TOLERANCE {
            return self.rate.partial_cmp(&other.rate).unwrap_or(Ordering::Equal);
        }
        self.degree
            .cmp(&other.degree)
            .then_with(|| self.log.cmp(&other.log))
    }

    fn plus(&self, other: &Growth) -> Growth {
        Growth {
            rate: self.rate + other.rate,
            degree: &self.degree + &other.degree,
            log: &self.log + &other.log,
        }
    }

    fn minus(&self, other: &Growth) -> Growth {
        Growth {
            rate: self.rate - other.rate,
            degree: &self.degree - &other.degree,
            log: &self.log - &other.log,
        }
    }

    fn scaled(&self, factor: &BigRational) -> Growth {
        Growth {
            rate: self.rate * factor.to_f64().unwrap_or(0.0),
            degree: &self.degree * factor,
            log: &self.log * factor,
        }
    }
}

struct Dominant {
    key: Monomial,
    coefficient: Poly,
    growth: Growth,
}

fn numeric_value(poly: &Poly, what: &str) -> Result<numeric::Approx, SymbolicError> {
    numeric::approx_poly(poly)
        .filter(|value| value.is_finite())
        .ok_or_else(|| SymbolicError::Unsupported(format!("non-numeric {what}")))
}

fn growth_of(key: &Monomial, var: &str) -> Result<Growth, SymbolicError> {
    let mut growth = Growth::flat();
    if !key.exp.is_zero() {
        let rate = linear_coefficient(&key.exp, var).ok_or_else(|| {
            SymbolicError::Unsupported(format!("exponential that is not linear in {var}"))
        })?;
        growth.rate += numeric_value(&rate, "exponential rate")?.re;
    }
    for (atom, count) in &key.factors {
        let count_ratio = BigRational::from_integer((*count).into());
        match atom {
            Atom::Symbol(name) if name == var => growth.degree += count_ratio,
            Atom::Ln(arg) => {
                let inner = rat_growth(arg, var)?;
                if inner.rate > RATE_TOLERANCE {
                    growth.degree += count_ratio;
                } else if inner.rate.abs() <= RATE_TOLERANCE && inner.degree.is_positive() {
                    growth.log += count_ratio;
                } else {
                    return Err(SymbolicError::Unsupported(format!(
                        "logarithm of a bounded function of {var}"
                    )));
                }
            }
            Atom::Root { radicand, index } => {
                let inner = dominant(radicand, var)?
                    .map(|found| found.growth)
                    .unwrap_or_else(Growth::flat);
                let share = BigRational::new((*count).into(), i64::from(*index).into());
                growth = growth.plus(&inner.scaled(&share));
            }
            Atom::Power { base, exponent } if !base.mentions(var) && exponent.den.is_one() => {
                let slope = linear_coefficient(&exponent.num, var).ok_or_else(|| {
                    SymbolicError::Unsupported(format!("power with exponent not linear in {var}"))
                })?;
                let slope = numeric_value(&slope, "power exponent")?;
                let magnitude = numeric::approx_rat(base)
                    .map(|value| value.modulus())
                    .filter(|value| *value > 0.0 && value.is_finite())
                    .ok_or_else(|| SymbolicError::Unsupported("non-numeric power base".to_string()))?;
                growth.rate += *count as f64 * slope.re * magnitude.ln();
            }
            other => {
                return Err(SymbolicError::Unsupported(format!(
                    "growth of {} in {var}",
                    Rat::from_atom(other.clone()).to_expr()
                )))
            }
        }
    }
    Ok(growth)
}

fn rat_growth(rat: &Rat, var: &str) -> Result<Growth, SymbolicError> {
    let top = dominant(&rat.num, var)?
        .ok_or_else(|| SymbolicError::Unsupported("logarithm of zero".to_string()))?;
    let bottom = dominant(&rat.den, var)?
        .ok_or_else(|| SymbolicError::division_by_zero("denominator"))?;
    Ok(top.growth.minus(&bottom.growth))
}

fn dominant(poly: &Poly, var: &str) -> Result<Option<Dominant>, SymbolicError> {
    let mut groups: BTreeMap<Monomial, Poly> = BTreeMap::new();
    for (mono, coeff) in &poly.terms {
        let (dependent, free) = mono.split(var);
        groups
            .entry(dependent)
            .or_insert_with(Poly::zero)
            .insert(free, coeff.clone());
    }
    let mut best: Option<Dominant> = None;
    let mut tied = false;
    for (key, coefficient) in groups {
        if coefficient.is_zero() {
            continue;
        }
        let growth = growth_of(&key, var)?;
        let order = best
            .as_ref()
            .map(|current| growth.compare(&current.growth))
            .unwrap_or(Ordering::Greater);
        match order {
            Ordering::Greater => {
                best = Some(Dominant {
                    key,
                    coefficient,
                    growth,
                });
                tied = false;
            }
            Ordering::Equal => tied = true,
            Ordering::Less => {}
        }
    }
    if tied {
        return Err(SymbolicError::Indeterminate(format!(
            "competing terms of equal growth in {var}"
        )));
    }
    Ok(best)
}

/// Limit of `rat` as `var -> oo`; errors describe `shown` approaching `point`.
fn infinite(rat: &Rat, var: &str, shown: &Rat, point: &LimitPoint) -> Result<Rat, SymbolicError> {
    if !rat.mentions(var) {
        return Ok(rat.clone());
    }
    let Some(top) = dominant(&rat.num, var)? else {
        return Ok(Rat::zero());
    };
    let bottom = dominant(&rat.den, var)?
        .ok_or_else(|| SymbolicError::division_by_zero("denominator at infinity"))?;
    match top.growth.compare(&bottom.growth) {
        Ordering::Less => Ok(Rat::zero()),
        Ordering::Greater => Err(SymbolicError::Divergent(format!(
            "{} grows without bound as {var} -> {point}",
            shown.to_expr()
        ))),
        Ordering::Equal if top.key == bottom.key => Rat::new(top.coefficient, bottom.coefficient),
        Ordering::Equal => Err(SymbolicError::Indeterminate(format!(
            "{} oscillates or has no dominant term as {var} -> {point}",
            shown.to_expr()
        ))),
    }
}
