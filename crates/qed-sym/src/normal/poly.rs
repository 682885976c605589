//! Laurent polynomials over exact rationals with symbolic atoms.

use std::collections::BTreeMap;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::radical::{integer_root, unit_root};
use super::Rat;
use crate::error::SymbolicError;

/// Upper bound on the number of terms a single product may produce.
pub(crate) const MAX_TERMS: usize = 4096;

/// Indivisible factor of a monomial.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Atom {
    Symbol(String),
    Pi,
    /// Imaginary unit; its count is kept at 1.
    I,
    /// `radicand^(1/index)`. Constant radicands are positive integers, and
    /// prime whenever `index == 2`.
    Root { radicand: Poly, index: u32 },
    Ln(Box<Rat>),
    /// `base^exponent` for an exponent that is not a rational constant.
    Power { base: Box<Rat>, exponent: Box<Rat> },
    /// `exp(arg)` for an argument with a non-constant denominator.
    Exp(Box<Rat>),
}

impl Atom {
    pub(crate) fn mentions(&self, var: &str) -> bool {
        match self {
            Atom::Symbol(name) => name == var,
            Atom::Pi | Atom::I => false,
            Atom::Root { radicand, .. } => radicand.mentions(var),
            Atom::Ln(arg) | Atom::Exp(arg) => arg.mentions(var),
            Atom::Power { base, exponent } => base.mentions(var) || exponent.mentions(var),
        }
    }

    pub(crate) fn has_symbols(&self) -> bool {
        match self {
            Atom::Symbol(_) => true,
            Atom::Pi | Atom::I => false,
            Atom::Root { radicand, .. } => radicand.has_symbols(),
            Atom::Ln(arg) | Atom::Exp(arg) => arg.has_symbols(),
            Atom::Power { base, exponent } => base.has_symbols() || exponent.has_symbols(),
        }
    }

    /// Atoms whose sign can be flipped to rationalise a denominator.
    pub(crate) fn is_quadratic_surd(&self) -> bool {
        match self {
            Atom::I => true,
            Atom::Root { radicand, index } => *index == 2 && radicand.as_constant().is_some(),
            _ => false,
        }
    }
}

/// Product of atoms with integer exponents times `exp(exp)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Monomial {
    pub(crate) factors: BTreeMap<Atom, i64>,
    pub(crate) exp: Poly,
}

impl Monomial {
    pub(crate) fn one() -> Self {
        Self::default()
    }

    pub(crate) fn atom(atom: Atom, count: i64) -> Self {
        let mut factors = BTreeMap::new();
        if count != 0 {
            factors.insert(atom, count);
        }
        Self {
            factors,
            exp: Poly::zero(),
        }
    }

    pub(crate) fn exponential(exp: Poly) -> Self {
        Self {
            factors: BTreeMap::new(),
            exp,
        }
    }

    pub(crate) fn is_one(&self) -> bool {
        self.factors.is_empty() && self.exp.is_zero()
    }

    pub(crate) fn count(&self, atom: &Atom) -> i64 {
        self.factors.get(atom).copied().unwrap_or(0)
    }

    pub(crate) fn combine(&self, other: &Monomial) -> Result<Monomial, SymbolicError> {
        let mut factors = self.factors.clone();
        for (atom, count) in &other.factors {
            let entry = factors.entry(atom.clone()).or_insert(0);
            *entry = entry
                .checked_add(*count)
                .ok_or_else(|| SymbolicError::TooLarge("exponent overflow".to_string()))?;
            if *entry == 0 {
                factors.remove(atom);
            }
        }
        Ok(Monomial {
            factors,
            exp: self.exp.add(&other.exp),
        })
    }

    pub(crate) fn inverse(&self) -> Monomial {
        Monomial {
            factors: self
                .factors
                .iter()
                .map(|(atom, count)| (atom.clone(), -count))
                .collect(),
            exp: self.exp.neg(),
        }
    }

    pub(crate) fn mentions(&self, var: &str) -> bool {
        self.factors.keys().any(|atom| atom.mentions(var)) || self.exp.mentions(var)
    }

    pub(crate) fn has_symbols(&self) -> bool {
        self.factors.keys().any(Atom::has_symbols) || self.exp.has_symbols()
    }

    /// Splits into the part that depends on `var` and the part that does not.
    pub(crate) fn split(&self, var: &str) -> (Monomial, Monomial) {
        let mut dependent = Monomial::one();
        let mut free = Monomial::one();
        for (atom, count) in &self.factors {
            if atom.mentions(var) {
                dependent.factors.insert(atom.clone(), *count);
            } else {
                free.factors.insert(atom.clone(), *count);
            }
        }
        for (mono, coeff) in &self.exp.terms {
            if mono.mentions(var) {
                dependent.exp.terms.insert(mono.clone(), coeff.clone());
            } else {
                free.exp.terms.insert(mono.clone(), coeff.clone());
            }
        }
        (dependent, free)
    }
}

/// Sparse Laurent polynomial; zero coefficients are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Poly {
    pub(crate) terms: BTreeMap<Monomial, BigRational>,
}

pub(crate) fn rational_pow(value: &BigRational, exponent: i64) -> BigRational {
    let magnitude = exponent.unsigned_abs() as usize;
    let numer = num_traits::pow(value.numer().clone(), magnitude);
    let denom = num_traits::pow(value.denom().clone(), magnitude);
    if exponent >= 0 {
        BigRational::new(numer, denom)
    } else {
        BigRational::new(denom, numer)
    }
}

impl Poly {
    pub(crate) fn zero() -> Self {
        Self::default()
    }

    pub(crate) fn one() -> Self {
        Self::constant(BigRational::one())
    }

    pub(crate) fn constant(value: BigRational) -> Self {
        Self::term(Monomial::one(), value)
    }

    pub(crate) fn integer(value: i64) -> Self {
        Self::constant(BigRational::from_integer(BigInt::from(value)))
    }

    pub(crate) fn term(mono: Monomial, coeff: BigRational) -> Self {
        let mut poly = Poly::zero();
        poly.insert(mono, coeff);
        poly
    }

    pub(crate) fn from_atom(atom: Atom) -> Self {
        Self::term(Monomial::atom(atom, 1), BigRational::one())
    }

    pub(crate) fn insert(&mut self, mono: Monomial, coeff: BigRational) {
        if coeff.is_zero() {
            return;
        }
        let remove = {
            let entry = self.terms.entry(mono.clone()).or_insert_with(BigRational::zero);
            *entry += coeff;
            entry.is_zero()
        };
        if remove {
            self.terms.remove(&mono);
        }
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.terms.is_empty()
    }

    pub(crate) fn is_one(&self) -> bool {
        self.as_constant().map(|value| value.is_one()).unwrap_or(false)
    }

    pub(crate) fn as_constant(&self) -> Option<BigRational> {
        match self.terms.len() {
            0 => Some(BigRational::zero()),
            1 => {
                let (mono, coeff) = self.terms.iter().next()?;
                mono.is_one().then(|| coeff.clone())
            }
            _ => None,
        }
    }

    pub(crate) fn single_term(&self) -> Option<(&Monomial, &BigRational)> {
        if self.terms.len() == 1 {
            self.terms.iter().next()
        } else {
            None
        }
    }

    pub(crate) fn leading_coeff(&self) -> Option<&BigRational> {
        self.terms.values().next()
    }

    pub(crate) fn mentions(&self, var: &str) -> bool {
        self.terms.keys().any(|mono| mono.mentions(var))
    }

    pub(crate) fn has_symbols(&self) -> bool {
        self.terms.keys().any(Monomial::has_symbols)
    }

    pub(crate) fn add(&self, other: &Poly) -> Poly {
        let mut out = self.clone();
        for (mono, coeff) in &other.terms {
            out.insert(mono.clone(), coeff.clone());
        }
        out
    }

    pub(crate) fn neg(&self) -> Poly {
        self.scale(&-BigRational::one())
    }

    pub(crate) fn scale(&self, factor: &BigRational) -> Poly {
        if factor.is_zero() {
            return Poly::zero();
        }
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(mono, coeff)| (mono.clone(), coeff * factor))
                .collect(),
        }
    }

    pub(crate) fn mul(&self, other: &Poly) -> Result<Poly, SymbolicError> {
        if self.terms.len().saturating_mul(other.terms.len()) > MAX_TERMS * 4 {
            return Err(SymbolicError::TooLarge(format!(
                "product of {} and {} terms",
                self.terms.len(),
                other.terms.len()
            )));
        }
        let mut out = Poly::zero();
        for (lhs_mono, lhs_coeff) in &self.terms {
            for (rhs_mono, rhs_coeff) in &other.terms {
                let coeff = lhs_coeff * rhs_coeff;
                let combined = lhs_mono.combine(rhs_mono)?;
                for (mono, value) in reduce_monomial(combined)?.terms {
                    out.insert(mono, value * &coeff);
                }
            }
        }
        if out.terms.len() > MAX_TERMS {
            return Err(SymbolicError::TooLarge(format!(
                "{} terms after expansion",
                out.terms.len()
            )));
        }
        Ok(out)
    }

    pub(crate) fn pow(&self, exponent: u32) -> Result<Poly, SymbolicError> {
        let mut result = Poly::one();
        let mut base = self.clone();
        let mut remaining = exponent;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.mul(&base)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.mul(&base)?;
            }
        }
        Ok(result)
    }

    /// Flips the sign of `atom` (a quadratic surd) in every term.
    pub(crate) fn conjugate(&self, atom: &Atom) -> Poly {
        Poly {
            terms: self
                .terms
                .iter()
                .map(|(mono, coeff)| {
                    if mono.count(atom).rem_euclid(2) == 1 {
                        (mono.clone(), -coeff.clone())
                    } else {
                        (mono.clone(), coeff.clone())
                    }
                })
                .collect(),
        }
    }

    /// Positive rational content: gcd of numerators over lcm of denominators.
    pub(crate) fn content(&self) -> BigRational {
        let mut numer = BigInt::zero();
        let mut denom = BigInt::one();
        for coeff in self.terms.values() {
            numer = numer.gcd(coeff.numer());
            denom = denom.lcm(coeff.denom());
        }
        if numer.is_zero() {
            return BigRational::one();
        }
        BigRational::new(numer, denom)
    }

    /// Largest monomial dividing every term (exponent-wise minimum, Laurent).
    pub(crate) fn common_monomial(&self) -> Monomial {
        let mut iter = self.terms.keys();
        let Some(first) = iter.next() else {
            return Monomial::one();
        };
        let mut factors = first.factors.clone();
        for mono in self.terms.keys() {
            for (atom, count) in factors.iter_mut() {
                *count = (*count).min(mono.count(atom));
            }
            for (atom, count) in &mono.factors {
                if *count < 0 && !factors.contains_key(atom) {
                    factors.insert(atom.clone(), *count);
                }
            }
        }
        factors.retain(|atom, count| *count != 0 && !atom.is_quadratic_surd());
        Monomial {
            factors,
            exp: Poly::zero(),
        }
    }

    /// Multiplies every term by a monomial without re-normalising it.
    pub(crate) fn shift(&self, by: &Monomial) -> Result<Poly, SymbolicError> {
        let mut out = Poly::zero();
        for (mono, coeff) in &self.terms {
            for (reduced, value) in reduce_monomial(mono.combine(by)?)?.terms {
                out.insert(reduced, value * coeff);
            }
        }
        Ok(out)
    }
}

/// Brings a monomial back to canonical form: reduces surd and `i` powers,
/// expands radicals whose exponent reached their index and evaluates
/// `exp(i*pi*q)` for the rational angles with exact values.
pub(crate) fn reduce_monomial(mono: Monomial) -> Result<Poly, SymbolicError> {
    let mut coeff = BigRational::one();
    let mut extras: Vec<Poly> = Vec::new();
    let mut factors = BTreeMap::new();
    for (atom, count) in mono.factors {
        match &atom {
            Atom::I => match count.rem_euclid(4) {
                0 => {}
                1 => {
                    factors.insert(atom, 1);
                }
                2 => coeff = -coeff,
                _ => {
                    coeff = -coeff;
                    factors.insert(atom, 1);
                }
            },
            Atom::Root { radicand, index } => {
                let index = i64::from(*index);
                if let Some(value) = radicand.as_constant() {
                    let whole = count.div_euclid(index);
                    let rest = count.rem_euclid(index);
                    if whole != 0 {
                        coeff *= rational_pow(&value, whole);
                    }
                    if rest != 0 {
                        factors.insert(atom, rest);
                    }
                } else if count >= index {
                    let whole = count / index;
                    let rest = count % index;
                    let whole = u32::try_from(whole)
                        .map_err(|_| SymbolicError::TooLarge("radical power".to_string()))?;
                    extras.push(radicand.pow(whole)?);
                    if rest != 0 {
                        factors.insert(atom, rest);
                    }
                } else {
                    factors.insert(atom, count);
                }
            }
            _ => {
                factors.insert(atom, count);
            }
        }
    }

    let mut exp = mono.exp;
    let turn = Monomial {
        factors: [(Atom::I, 1), (Atom::Pi, 1)].into_iter().collect(),
        exp: Poly::zero(),
    };
    if let Some(angle) = exp.terms.get(&turn).cloned() {
        if let Some(value) = unit_root(&angle) {
            exp.terms.remove(&turn);
            extras.push(value);
        }
    }

    let mut result = Poly::term(Monomial { factors, exp }, coeff);
    for extra in extras {
        result = result.mul(&extra)?;
    }
    Ok(result)
}

/// `n^(1/index)` as a polynomial in reduced radicals.
pub(crate) fn integer_radical(value: &BigInt, index: u32) -> Poly {
    let (outside, inside) = integer_root(value, index);
    let mut factors = BTreeMap::new();
    for radicand in inside {
        factors.insert(
            Atom::Root {
                radicand: Poly::constant(BigRational::from_integer(radicand)),
                index,
            },
            1,
        );
    }
    Poly::term(
        Monomial {
            factors,
            exp: Poly::zero(),
        },
        BigRational::from_integer(outside),
    )
}

/// Principal `index`-th root of a rational constant.
pub(crate) fn rational_radical(value: &BigRational, index: u32) -> Result<Poly, SymbolicError> {
    if value.is_zero() {
        return Ok(Poly::zero());
    }
    if value.is_negative() {
        let positive = rational_radical(&-value.clone(), index)?;
        return match index {
            2 => positive.mul(&Poly::from_atom(Atom::I)),
            odd if odd % 2 == 1 => Ok(positive.neg()),
            _ => Err(SymbolicError::Unsupported(format!(
                "even root of index {index} of a negative number"
            ))),
        };
    }
    let denom = value.denom();
    let lifted = value.numer() * num_traits::pow(denom.clone(), index as usize - 1);
    let root = integer_radical(&lifted, index);
    Ok(root.scale(&BigRational::new(BigInt::one(), denom.clone())))
}

/// Converts a small positive exponent, rejecting anything above `max`.
pub(crate) fn bounded_exponent(value: &BigInt, max: u32) -> Result<u32, SymbolicError> {
    value
        .to_u32()
        .filter(|exponent| *exponent <= max)
        .ok_or_else(|| SymbolicError::TooLarge(format!("exponent {value} exceeds {max}")))
}
