//! Exact radicals and roots of unity.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{One, ToPrimitive};

use super::poly::{Atom, Monomial, Poly};

const TRIAL_DIVISION_LIMIT: u64 = 100_000;

/// Splits a positive integer `n` into `outside * (inside...)^(1/index)`.
///
/// For square roots every inside factor is a distinct prime (or a cofactor
/// without small prime divisors); other indices keep a single combined
/// radicand.
pub(crate) fn integer_root(value: &BigInt, index: u32) -> (BigInt, Vec<BigInt>) {
    let mut outside = BigInt::one();
    let mut inside = Vec::new();
    let mut combined = BigInt::one();
    let mut rest = value.clone();
    let mut divisor = 2u64;
    while divisor <= TRIAL_DIVISION_LIMIT && BigInt::from(divisor * divisor) <= rest {
        let prime = BigInt::from(divisor);
        let mut multiplicity = 0u32;
        while rest.is_multiple_of(&prime) {
            rest /= &prime;
            multiplicity += 1;
        }
        if multiplicity > 0 {
            outside *= num_traits::pow(prime.clone(), (multiplicity / index) as usize);
            let leftover = multiplicity % index;
            if leftover > 0 {
                if index == 2 {
                    inside.push(prime);
                } else {
                    combined *= num_traits::pow(prime, leftover as usize);
                }
            }
        }
        divisor += if divisor == 2 { 1 } else { 2 };
    }
    if rest > BigInt::one() {
        let root = rest.nth_root(index);
        if num_traits::pow(root.clone(), index as usize) == rest {
            outside *= root;
        } else if index == 2 {
            inside.push(rest);
        } else {
            combined *= rest;
        }
    }
    if combined > BigInt::one() {
        inside.push(combined);
    }
    (outside, inside)
}

fn surd(value: i64, half: bool) -> Poly {
    let coeff = if half {
        BigRational::new(BigInt::one(), BigInt::from(2))
    } else {
        BigRational::one()
    };
    Poly::term(
        Monomial::atom(
            Atom::Root {
                radicand: Poly::integer(value),
                index: 2,
            },
            1,
        ),
        coeff,
    )
}

fn half() -> Poly {
    Poly::constant(BigRational::new(BigInt::one(), BigInt::from(2)))
}

/// `exp(i*pi*angle)` when the angle is a multiple of 1/6 or 1/4.
pub(crate) fn unit_root(angle: &BigRational) -> Option<Poly> {
    let two = BigRational::from_integer(BigInt::from(2));
    let reduced = angle - (angle / &two).floor() * &two;
    let twelfths = reduced * BigRational::from_integer(BigInt::from(12));
    if !twelfths.is_integer() {
        return None;
    }
    let step = twelfths.to_integer().to_u32()?;
    if step % 2 != 0 && step % 3 != 0 {
        return None;
    }
    let (cos, sin) = match step % 6 {
        0 => (Poly::one(), Poly::zero()),
        2 => (surd(3, true), half()),
        3 => (surd(2, true), surd(2, true)),
        4 => (half(), surd(3, true)),
        _ => return None,
    };
    let (cos, sin) = match step / 6 {
        0 => (cos, sin),
        1 => (sin.neg(), cos),
        2 => (cos.neg(), sin.neg()),
        _ => (sin, cos.neg()),
    };
    let i_sin = Poly {
        terms: sin
            .terms
            .into_iter()
            .map(|(mut mono, coeff)| {
                mono.factors.insert(Atom::I, 1);
                (mono, coeff)
            })
            .collect(),
    };
    Some(cos.add(&i_sin))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_root_splits_into_primes() {
        let (outside, inside) = integer_root(&BigInt::from(360), 2);
        assert_eq!(outside, BigInt::from(6));
        assert_eq!(inside, vec![BigInt::from(2), BigInt::from(5)]);
    }

    #[test]
    fn cube_root_keeps_combined_radicand() {
        let (outside, inside) = integer_root(&BigInt::from(54), 3);
        assert_eq!(outside, BigInt::from(3));
        assert_eq!(inside, vec![BigInt::from(2)]);
    }

    #[test]
    fn half_turn_is_minus_one() {
        let value = unit_root(&BigRational::one()).expect("exact");
        assert_eq!(value, Poly::integer(-1));
    }

    #[test]
    fn odd_twelfths_are_left_alone() {
        let angle = BigRational::new(BigInt::one(), BigInt::from(12));
        assert!(unit_root(&angle).is_none());
    }
}
