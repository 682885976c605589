//! Floating point evaluation of constant normal forms.
//!
//! Only used to rank growth rates and to sanity check; exact decisions never
//! depend on it.

use num_traits::ToPrimitive;

use super::{Atom, Monomial, Poly, Rat};

/// Complex approximation `re + i*im`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Approx {
    pub(crate) re: f64,
    pub(crate) im: f64,
}

impl Approx {
    pub(crate) const ZERO: Approx = Approx { re: 0.0, im: 0.0 };
    pub(crate) const ONE: Approx = Approx { re: 1.0, im: 0.0 };

    pub(crate) fn real(re: f64) -> Self {
        Approx { re, im: 0.0 }
    }

    fn add(self, other: Approx) -> Approx {
        Approx {
            re: self.re + other.re,
            im: self.im + other.im,
        }
    }

    fn mul(self, other: Approx) -> Approx {
        Approx {
            re: self.re * other.re - self.im * other.im,
            im: self.re * other.im + self.im * other.re,
        }
    }

    fn scale(self, factor: f64) -> Approx {
        Approx {
            re: self.re * factor,
            im: self.im * factor,
        }
    }

    fn div(self, other: Approx) -> Option<Approx> {
        let norm = other.re * other.re + other.im * other.im;
        if norm == 0.0 {
            return None;
        }
        Some(Approx {
            re: (self.re * other.re + self.im * other.im) / norm,
            im: (self.im * other.re - self.re * other.im) / norm,
        })
    }

    fn exp(self) -> Approx {
        let magnitude = self.re.exp();
        Approx {
            re: magnitude * self.im.cos(),
            im: magnitude * self.im.sin(),
        }
    }

    fn ln(self) -> Option<Approx> {
        let modulus = self.re.hypot(self.im);
        if modulus == 0.0 {
            return None;
        }
        Some(Approx {
            re: modulus.ln(),
            im: self.im.atan2(self.re),
        })
    }

    fn powi(self, count: i64) -> Option<Approx> {
        let mut result = Approx::ONE;
        for _ in 0..count.unsigned_abs() {
            result = result.mul(self);
        }
        if count < 0 {
            Approx::ONE.div(result)
        } else {
            Some(result)
        }
    }

    fn powc(self, exponent: Approx) -> Option<Approx> {
        if self.re == 0.0 && self.im == 0.0 {
            return Some(Approx::ZERO);
        }
        Some(self.ln()?.mul(exponent).exp())
    }

    /// `|self|` rounded to the real axis when the imaginary part is negligible.
    pub(crate) fn modulus(self) -> f64 {
        self.re.hypot(self.im)
    }

    pub(crate) fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

/// Evaluates a symbol-free normal form; `None` when a symbol or a pole is hit.
pub(crate) fn approx_rat(rat: &Rat) -> Option<Approx> {
    approx_poly(&rat.num)?.div(approx_poly(&rat.den)?)
}

pub(crate) fn approx_poly(poly: &Poly) -> Option<Approx> {
    poly.terms.iter().try_fold(Approx::ZERO, |acc, (mono, coeff)| {
        let value = approx_monomial(mono)?.scale(coeff.to_f64()?);
        Some(acc.add(value))
    })
}

fn approx_monomial(mono: &Monomial) -> Option<Approx> {
    let mut value = approx_poly(&mono.exp)?.exp();
    for (atom, count) in &mono.factors {
        value = value.mul(approx_atom(atom)?.powi(*count)?);
    }
    Some(value)
}

fn approx_atom(atom: &Atom) -> Option<Approx> {
    match atom {
        Atom::Symbol(_) => None,
        Atom::Pi => Some(Approx::real(std::f64::consts::PI)),
        Atom::I => Some(Approx { re: 0.0, im: 1.0 }),
        Atom::Root { radicand, index } => {
            approx_poly(radicand)?.powc(Approx::real(1.0 / f64::from(*index)))
        }
        Atom::Ln(arg) => approx_rat(arg)?.ln(),
        Atom::Exp(arg) => Some(approx_rat(arg)?.exp()),
        Atom::Power { base, exponent } => approx_rat(base)?.powc(approx_rat(exponent)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Expr;

    fn approx(text: &str) -> Approx {
        let expr = Expr::parse(text).expect("parse");
        let rat = Rat::from_expr(&expr, 64).expect("normalise");
        approx_rat(&rat).expect("constant")
    }

    #[test]
    fn golden_ratio_evaluates() {
        let value = approx("(1 + sqrt(5))/2");
        assert!((value.re - 1.618_033_988_749_895).abs() < 1e-12);
        assert!(value.im.abs() < 1e-12);
    }

    #[test]
    fn symbols_do_not_evaluate() {
        let expr = Expr::parse("x + 1").expect("parse");
        let rat = Rat::from_expr(&expr, 64).expect("normalise");
        assert!(approx_rat(&rat).is_none());
    }
}
