//! Canonical rational normal form.
//!
//! Every expression the oracle touches is brought into a [`Rat`]: a quotient
//! of two sparse Laurent polynomials whose atoms are symbols, `pi`, `i`,
//! reduced radicals, logarithms and symbolic powers, with exponentials folded
//! into each monomial. Two expressions are equal exactly when the numerator
//! of their difference is the zero polynomial, which is the property the
//! simplification strategy relies on.

mod convert;
pub(crate) mod numeric;
mod poly;
mod radical;

use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::error::SymbolicError;

pub(crate) use poly::{reduce_monomial, Atom, Monomial, Poly};

use poly::{bounded_exponent, rational_radical};

const MAX_RATIONALISE_ROUNDS: usize = 16;

/// Quotient of two polynomials kept in lowest canonical terms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct Rat {
    pub(crate) num: Poly,
    pub(crate) den: Poly,
}

fn too_large(what: impl std::fmt::Display) -> SymbolicError {
    SymbolicError::TooLarge(what.to_string())
}

impl Rat {
    pub(crate) fn zero() -> Self {
        Self::from_poly(Poly::zero())
    }

    pub(crate) fn one() -> Self {
        Self::from_poly(Poly::one())
    }

    pub(crate) fn constant(value: BigRational) -> Self {
        Self::from_poly(Poly::constant(value))
    }

    pub(crate) fn from_poly(num: Poly) -> Self {
        Self {
            num,
            den: Poly::one(),
        }
    }

    pub(crate) fn from_atom(atom: Atom) -> Self {
        Self::from_poly(Poly::from_atom(atom))
    }

    /// Builds `num / den` and brings it to canonical form.
    pub(crate) fn new(num: Poly, den: Poly) -> Result<Self, SymbolicError> {
        if den.is_zero() {
            return Err(SymbolicError::division_by_zero("denominator simplifies to zero"));
        }
        if num.is_zero() {
            return Ok(Self::zero());
        }
        let (mut num, mut den) = (num, den);

        let mut rounds = 0;
        while let Some(surd) = first_surd(&den) {
            rounds += 1;
            if rounds > MAX_RATIONALISE_ROUNDS {
                return Err(too_large("denominator has too many radicals"));
            }
            let conjugate = if den.terms.keys().all(|mono| mono.count(&surd) == 1) {
                Poly::from_atom(surd.clone())
            } else {
                den.conjugate(&surd)
            };
            num = num.mul(&conjugate)?;
            den = den.mul(&conjugate)?;
            if den.is_zero() {
                return Err(SymbolicError::division_by_zero("denominator simplifies to zero"));
            }
        }

        let common = den.common_monomial();
        if !common.is_one() {
            let inverse = common.inverse();
            num = num.shift(&inverse)?;
            den = den.shift(&inverse)?;
        }

        if let Some((mono, coeff)) = den.single_term() {
            let scale = BigRational::one() / coeff;
            let inverse = mono.inverse();
            num = num.shift(&inverse)?.scale(&scale);
            return Ok(Self::from_poly(num));
        }

        if let Some(lead) = den.leading_coeff().cloned() {
            if !lead.is_one() {
                let scale = BigRational::one() / lead;
                num = num.scale(&scale);
                den = den.scale(&scale);
            }
        }

        if num.terms.len() == den.terms.len() {
            if let Some(ratio) = num.leading_coeff().cloned() {
                if num == den.scale(&ratio) {
                    return Ok(Self::constant(ratio));
                }
            }
        }
        Ok(Self { num, den })
    }

    pub(crate) fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub(crate) fn as_constant(&self) -> Option<BigRational> {
        if self.den.is_one() {
            self.num.as_constant()
        } else {
            None
        }
    }

    pub(crate) fn is_one(&self) -> bool {
        self.as_constant().map(|value| value.is_one()).unwrap_or(false)
    }

    pub(crate) fn mentions(&self, var: &str) -> bool {
        self.num.mentions(var) || self.den.mentions(var)
    }

    pub(crate) fn has_symbols(&self) -> bool {
        self.num.has_symbols() || self.den.has_symbols()
    }

    pub(crate) fn add(&self, other: &Rat) -> Result<Rat, SymbolicError> {
        if self.den == other.den {
            return Rat::new(self.num.add(&other.num), self.den.clone());
        }
        let num = self.num.mul(&other.den)?.add(&other.num.mul(&self.den)?);
        Rat::new(num, self.den.mul(&other.den)?)
    }

    pub(crate) fn neg(&self) -> Rat {
        Rat {
            num: self.num.neg(),
            den: self.den.clone(),
        }
    }

    pub(crate) fn sub(&self, other: &Rat) -> Result<Rat, SymbolicError> {
        self.add(&other.neg())
    }

    pub(crate) fn mul(&self, other: &Rat) -> Result<Rat, SymbolicError> {
        Rat::new(self.num.mul(&other.num)?, self.den.mul(&other.den)?)
    }

    pub(crate) fn scale(&self, factor: &BigRational) -> Rat {
        if factor.is_zero() {
            return Rat::zero();
        }
        Rat {
            num: self.num.scale(factor),
            den: self.den.clone(),
        }
    }

    pub(crate) fn inverse(&self) -> Result<Rat, SymbolicError> {
        if self.is_zero() {
            return Err(SymbolicError::division_by_zero("reciprocal of zero"));
        }
        Rat::new(self.den.clone(), self.num.clone())
    }

    pub(crate) fn div(&self, other: &Rat) -> Result<Rat, SymbolicError> {
        if other.is_zero() {
            return Err(SymbolicError::division_by_zero("division by an expression equal to zero"));
        }
        Rat::new(self.num.mul(&other.den)?, self.den.mul(&other.num)?)
    }

    pub(crate) fn pow_int(&self, exponent: i64, max: u32) -> Result<Rat, SymbolicError> {
        if exponent.unsigned_abs() > u64::from(max) {
            return Err(too_large(format!("exponent {exponent} exceeds {max}")));
        }
        if exponent < 0 {
            return self.inverse()?.pow_int(-exponent, max);
        }
        let mut result = Rat::one();
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

    pub(crate) fn pow_rational(&self, exponent: &BigRational, max: u32) -> Result<Rat, SymbolicError> {
        if exponent.is_integer() {
            let whole = exponent
                .to_integer()
                .to_i64()
                .ok_or_else(|| too_large(format!("exponent {exponent}")))?;
            return self.pow_int(whole, max);
        }
        let whole = exponent.floor();
        let fraction = exponent - &whole;
        let index = bounded_exponent(fraction.denom(), max)?;
        let count = fraction
            .numer()
            .to_i64()
            .ok_or_else(|| too_large(format!("exponent {exponent}")))?;
        let whole = whole
            .to_integer()
            .to_i64()
            .ok_or_else(|| too_large(format!("exponent {exponent}")))?;
        let root = self.root(index)?;
        root.pow_int(count, max)?.mul(&self.pow_int(whole, max)?)
    }

    /// `self^exponent` for an arbitrary exponent.
    pub(crate) fn pow(&self, exponent: &Rat, max: u32) -> Result<Rat, SymbolicError> {
        if let Some(value) = exponent.as_constant() {
            return self.pow_rational(&value, max);
        }
        if self.is_zero() || self.is_one() {
            return Ok(self.clone());
        }
        if self.den.is_one() {
            if let Some((mono, coeff)) = self.num.single_term() {
                if coeff.is_one() && mono.factors.is_empty() {
                    return Rat::from_poly(mono.exp.clone()).mul(exponent)?.exp(max);
                }
            }
        }
        if !exponent.den.is_one() {
            let atom = Atom::Power {
                base: Box::new(self.clone()),
                exponent: Box::new(exponent.clone()),
            };
            return Ok(Rat::from_atom(atom));
        }

        let mut symbolic = exponent.num.clone();
        let constant = symbolic
            .terms
            .remove(&Monomial::one())
            .unwrap_or_else(BigRational::zero);
        let lead = symbolic
            .leading_coeff()
            .cloned()
            .unwrap_or_else(BigRational::one);
        let content = symbolic.content();
        let mut unit = if content.is_integer() { content } else { BigRational::one() };
        if lead.is_negative() {
            unit = -unit;
        }
        let count = unit
            .to_integer()
            .to_i64()
            .ok_or_else(|| too_large("exponent coefficient"))?;
        let atom = Atom::Power {
            base: Box::new(self.clone()),
            exponent: Box::new(Rat::from_poly(
                symbolic.scale(&(BigRational::one() / &unit)),
            )),
        };
        let power = Rat::from_poly(reduce_monomial(Monomial::atom(atom, count))?);
        if constant.is_zero() {
            Ok(power)
        } else {
            power.mul(&self.pow_rational(&constant, max)?)
        }
    }

    /// Principal `index`-th root.
    pub(crate) fn root(&self, index: u32) -> Result<Rat, SymbolicError> {
        if index == 0 {
            return Err(SymbolicError::division_by_zero("root of index zero"));
        }
        if index == 1 {
            return Ok(self.clone());
        }
        if let Some(value) = self.as_constant() {
            return Ok(Rat::from_poly(rational_radical(&value, index)?));
        }
        let lifted = if self.den.is_one() {
            self.num.clone()
        } else {
            self.num.mul(&self.den.pow(index - 1)?)?
        };
        let content = lifted.content();
        let radicand = lifted.scale(&(BigRational::one() / &content));
        let outside = Rat::from_poly(rational_radical(&content, index)?);
        let inside = Rat::from_atom(Atom::Root { radicand, index });
        let root = outside.mul(&inside)?;
        if self.den.is_one() {
            Ok(root)
        } else {
            root.div(&Rat::from_poly(self.den.clone()))
        }
    }

    pub(crate) fn exp(&self, max: u32) -> Result<Rat, SymbolicError> {
        if self.is_zero() {
            return Ok(Rat::one());
        }
        if !self.den.is_one() {
            return Ok(Rat::from_atom(Atom::Exp(Box::new(self.clone()))));
        }
        let mut exponent = self.num.clone();
        let mut result = Rat::one();
        let logs: Vec<(Monomial, BigRational)> = exponent
            .terms
            .iter()
            .filter(|(mono, coeff)| {
                coeff.is_integer()
                    && mono.exp.is_zero()
                    && mono.factors.len() == 1
                    && mono
                        .factors
                        .iter()
                        .all(|(atom, count)| *count == 1 && matches!(atom, Atom::Ln(_)))
            })
            .map(|(mono, coeff)| (mono.clone(), coeff.clone()))
            .collect();
        for (mono, coeff) in logs {
            exponent.terms.remove(&mono);
            let power = coeff
                .to_integer()
                .to_i64()
                .ok_or_else(|| too_large("logarithm multiplicity"))?;
            for atom in mono.factors.keys() {
                if let Atom::Ln(arg) = atom {
                    result = result.mul(&arg.pow_int(power, max)?)?;
                }
            }
        }
        let rest = Rat::from_poly(reduce_monomial(Monomial::exponential(exponent))?);
        result.mul(&rest)
    }

    pub(crate) fn ln(&self, max: u32) -> Result<Rat, SymbolicError> {
        if self.is_zero() {
            return Err(SymbolicError::Divergent("logarithm of zero".to_string()));
        }
        if let Some(value) = self.as_constant() {
            if value.is_one() {
                return Ok(Rat::zero());
            }
            if value.is_negative() {
                let i_pi = Rat::from_poly(Poly::term(
                    Monomial {
                        factors: [(Atom::I, 1), (Atom::Pi, 1)].into_iter().collect(),
                        exp: Poly::zero(),
                    },
                    BigRational::one(),
                ));
                return Rat::constant(-value).ln(max)?.add(&i_pi);
            }
        }
        if self.den.is_one() {
            if let Some((mono, coeff)) = self.num.single_term() {
                let real_exponent = mono.exp.terms.keys().all(|term| term.count(&Atom::I) == 0);
                if !mono.exp.is_zero() && real_exponent {
                    let rest = Rat::from_poly(Poly::term(
                        Monomial {
                            factors: mono.factors.clone(),
                            exp: Poly::zero(),
                        },
                        coeff.clone(),
                    ));
                    return rest.ln(max)?.add(&Rat::from_poly(mono.exp.clone()));
                }
            }
        }
        Ok(Rat::from_atom(Atom::Ln(Box::new(self.clone()))))
    }
}

fn first_surd(poly: &Poly) -> Option<Atom> {
    poly.terms
        .keys()
        .flat_map(|mono| mono.factors.keys())
        .find(|atom| atom.is_quadratic_surd())
        .cloned()
}
