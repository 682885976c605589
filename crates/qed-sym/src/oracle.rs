//! The oracle seam consumed by the verification engine.

use num_rational::BigRational;
use num_traits::{One, Signed};
use serde::{Deserialize, Serialize};

use crate::calculus::diff::derivative;
use crate::calculus::integrate::{antiderivative, check_interval};
use crate::calculus::limit::{limit, LimitSettings};
use crate::error::SymbolicError;
use crate::expr::{Expr, Interval, LimitPoint};
use crate::normal::{Poly, Rat};

/// Exact symbolic computations the strategies rely on.
///
/// Every operation is fallible; the engine turns an `Err` into an
/// inconclusive verdict instead of propagating it.
pub trait Oracle {
    /// Canonical simplified form.
    fn simplify(&self, expr: &Expr) -> Result<Expr, SymbolicError>;
    /// Fully distributed form.
    fn expand(&self, expr: &Expr) -> Result<Expr, SymbolicError>;
    /// Form with rational content and common factors pulled out.
    fn factor(&self, expr: &Expr) -> Result<Expr, SymbolicError>;
    /// Limit of `expr` as `var` approaches `point`.
    fn limit(&self, expr: &Expr, var: &str, point: &LimitPoint) -> Result<Expr, SymbolicError>;
    /// Derivative with respect to `var`.
    fn differentiate(&self, expr: &Expr, var: &str) -> Result<Expr, SymbolicError>;
    /// Antiderivative when `bounds` is `None`, definite integral otherwise.
    fn integrate(
        &self,
        expr: &Expr,
        var: &str,
        bounds: Option<&Interval>,
    ) -> Result<Expr, SymbolicError>;
    /// Exact zero test.
    fn is_zero(&self, expr: &Expr) -> Result<bool, SymbolicError>;
    /// Whether `expr` simplifies to a value with no free symbols.
    fn is_constant(&self, expr: &Expr) -> Result<bool, SymbolicError>;
}

/// Size and depth guards for [`SymbolicOracle`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct OracleConfig {
    /// Maximum rounds of L'Hôpital's rule for a finite-point limit.
    #[serde(default = "OracleConfig::default_lhopital_depth")]
    pub lhopital_depth: u32,
    /// Largest integer exponent expanded symbolically.
    #[serde(default = "OracleConfig::default_max_power")]
    pub max_power: u32,
}

impl OracleConfig {
    const fn default_lhopital_depth() -> u32 {
        6
    }

    const fn default_max_power() -> u32 {
        64
    }
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            lhopital_depth: Self::default_lhopital_depth(),
            max_power: Self::default_max_power(),
        }
    }
}

/// Built-in exact oracle backed by the rational normal form.
#[derive(Debug, Clone, Default)]
pub struct SymbolicOracle {
    config: OracleConfig,
}

impl SymbolicOracle {
    /// Oracle with default guards.
    pub fn new() -> Self {
        Self::default()
    }

    /// Oracle with explicit guards.
    pub fn with_config(config: OracleConfig) -> Self {
        Self { config }
    }

    /// Active configuration.
    pub fn config(&self) -> &OracleConfig {
        &self.config
    }

    fn normalise(&self, expr: &Expr) -> Result<Rat, SymbolicError> {
        Rat::from_expr(expr, self.config.max_power)
    }

    fn settings(&self) -> LimitSettings {
        LimitSettings {
            max_power: self.config.max_power,
            lhopital_depth: self.config.lhopital_depth,
        }
    }

    fn bound_value(&self, antiderivative: &Rat, var: &str, point: &LimitPoint) -> Result<Rat, SymbolicError> {
        match point {
            LimitPoint::Finite(at) => {
                self.normalise(&antiderivative.to_expr().substitute(var, at))
            }
            infinite => limit(antiderivative, var, infinite, self.settings()),
        }
    }
}

impl Oracle for SymbolicOracle {
    fn simplify(&self, expr: &Expr) -> Result<Expr, SymbolicError> {
        let result = self.normalise(expr)?.to_expr();
        tracing::trace!(input = %expr, output = %result, "simplify");
        Ok(result)
    }

    fn expand(&self, expr: &Expr) -> Result<Expr, SymbolicError> {
        let rat = self.normalise(expr)?;
        if rat.den.is_one() {
            return Ok(rat.to_expr());
        }
        let reciprocal = Rat::new(Poly::one(), rat.den.clone())?.to_expr();
        let terms: Vec<Expr> = rat
            .num
            .terms
            .iter()
            .map(|(mono, coeff)| {
                let term = Rat::from_poly(Poly::term(mono.clone(), coeff.clone()));
                term.to_expr() * reciprocal.clone()
            })
            .collect();
        Ok(match terms.len() {
            1 => terms.into_iter().next().unwrap_or_else(Expr::zero),
            _ => Expr::Add(terms),
        })
    }

    fn factor(&self, expr: &Expr) -> Result<Expr, SymbolicError> {
        let rat = self.normalise(expr)?;
        if rat.is_zero() {
            return Ok(Expr::zero());
        }
        let mut content = rat.num.content();
        if rat.num.leading_coeff().map(Signed::is_negative).unwrap_or(false) {
            content = -content;
        }
        let common = rat.num.common_monomial();
        let inner = rat
            .num
            .scale(&(BigRational::one() / &content))
            .shift(&common.inverse())?;
        let outer = Poly::term(common, content);
        let mut factors = vec![Rat::from_poly(outer).to_expr()];
        if !inner.is_one() {
            factors.push(Rat::from_poly(inner).to_expr());
        }
        if !rat.den.is_one() {
            factors.push(Rat::from_poly(rat.den.clone()).to_expr().pow(Expr::int(-1)));
        }
        let factors: Vec<Expr> = factors
            .into_iter()
            .filter(|factor| factor.as_rational().map(|value| !value.is_one()).unwrap_or(true))
            .collect();
        Ok(match factors.len() {
            0 => Expr::one(),
            1 => factors.into_iter().next().unwrap_or_else(Expr::one),
            _ => Expr::Mul(factors),
        })
    }

    fn limit(&self, expr: &Expr, var: &str, point: &LimitPoint) -> Result<Expr, SymbolicError> {
        let rat = self.normalise(expr)?;
        let result = limit(&rat, var, point, self.settings())?.to_expr();
        tracing::debug!(input = %expr, var, point = %point, output = %result, "limit");
        Ok(result)
    }

    fn differentiate(&self, expr: &Expr, var: &str) -> Result<Expr, SymbolicError> {
        let result = self.normalise(&derivative(expr, var))?.to_expr();
        tracing::debug!(input = %expr, var, output = %result, "differentiate");
        Ok(result)
    }

    fn integrate(
        &self,
        expr: &Expr,
        var: &str,
        bounds: Option<&Interval>,
    ) -> Result<Expr, SymbolicError> {
        let integrand = self.normalise(expr)?;
        let primitive = antiderivative(&integrand, var, self.config.max_power)?;
        let result = match bounds {
            None => primitive,
            Some(interval) => {
                check_interval(&integrand, var, interval, self.config.max_power)?;
                let upper = self.bound_value(&primitive, var, &interval.upper)?;
                let lower = self.bound_value(&primitive, var, &interval.lower)?;
                upper.sub(&lower)?
            }
        }
        .to_expr();
        tracing::debug!(input = %expr, var, definite = bounds.is_some(), output = %result, "integrate");
        Ok(result)
    }

    fn is_zero(&self, expr: &Expr) -> Result<bool, SymbolicError> {
        Ok(self.normalise(expr)?.is_zero())
    }

    fn is_constant(&self, expr: &Expr) -> Result<bool, SymbolicError> {
        Ok(!self.normalise(expr)?.has_symbols())
    }
}
