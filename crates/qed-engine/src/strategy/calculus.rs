use qed_sym::{Expr, Interval, LimitPoint};

use super::{residual, AttemptContext, Outcome, Strategy, StrategyFault};
use crate::method::ProofMethod;

/// `lim_{variable -> point} expression = expected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LimitEquality {
    /// Expression whose limit is taken.
    pub expression: Expr,
    /// Limit variable.
    pub variable: String,
    /// Point approached.
    pub point: LimitPoint,
    /// Claimed value.
    pub expected: Expr,
}

impl Strategy for LimitEquality {
    fn method(&self) -> ProofMethod {
        ProofMethod::Limit
    }

    fn attempt(&self, cx: &mut AttemptContext<'_>) -> Result<Outcome, StrategyFault> {
        let oracle = cx.oracle();
        let computed = oracle.limit(&self.expression, &self.variable, &self.point)?;
        cx.step(format!(
            "lim {} -> {} of {} = {computed}",
            self.variable, self.point, self.expression
        ));
        cx.step(format!("expected {}", self.expected));
        let (difference, zero) = residual(oracle, &computed, &self.expected)?;
        if zero {
            cx.step("computed limit matches expected value");
            Ok(Outcome::Proven)
        } else {
            cx.step(format!("limit differs from expected value by {difference}"));
            Ok(Outcome::Refuted)
        }
    }
}

/// `d function / d variable = expected`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivativeEquality {
    /// Function being differentiated.
    pub function: Expr,
    /// Differentiation variable.
    pub variable: String,
    /// Claimed derivative.
    pub expected: Expr,
}

impl Strategy for DerivativeEquality {
    fn method(&self) -> ProofMethod {
        ProofMethod::Derivative
    }

    fn attempt(&self, cx: &mut AttemptContext<'_>) -> Result<Outcome, StrategyFault> {
        let oracle = cx.oracle();
        let computed = oracle.differentiate(&self.function, &self.variable)?;
        cx.step(format!(
            "d/d{} ({}) = {computed}",
            self.variable, self.function
        ));
        let (difference, zero) = residual(oracle, &computed, &self.expected)?;
        if zero {
            cx.step(format!("matches expected derivative {}", self.expected));
            Ok(Outcome::Proven)
        } else {
            cx.step(format!(
                "differs from expected derivative {} by {difference}",
                self.expected
            ));
            Ok(Outcome::Refuted)
        }
    }
}

/// `integral of integrand d variable = expected`, over `bounds` when given.
///
/// Without bounds a constant residual is accepted: antiderivatives agree up
/// to a constant of integration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegralEquality {
    /// Function being integrated.
    pub integrand: Expr,
    /// Integration variable.
    pub variable: String,
    /// Interval for a definite integral; `None` for an antiderivative.
    pub bounds: Option<Interval>,
    /// Claimed value or antiderivative.
    pub expected: Expr,
}

impl Strategy for IntegralEquality {
    fn method(&self) -> ProofMethod {
        ProofMethod::Integral
    }

    fn attempt(&self, cx: &mut AttemptContext<'_>) -> Result<Outcome, StrategyFault> {
        let oracle = cx.oracle();
        let computed = oracle.integrate(&self.integrand, &self.variable, self.bounds.as_ref())?;
        match &self.bounds {
            Some(bounds) => cx.step(format!(
                "integral of {} d{} from {} to {} = {computed}",
                self.integrand, self.variable, bounds.lower, bounds.upper
            )),
            None => cx.step(format!(
                "antiderivative of {} d{} = {computed}",
                self.integrand, self.variable
            )),
        }
        let (difference, zero) = residual(oracle, &computed, &self.expected)?;
        if zero {
            cx.step(format!("matches expected {}", self.expected));
            return Ok(Outcome::Proven);
        }
        if self.bounds.is_none() && oracle.is_constant(&difference)? {
            cx.step(format!(
                "differs from {} by the constant {difference}; equal up to a constant of integration",
                self.expected
            ));
            return Ok(Outcome::Proven);
        }
        cx.step(format!("differs from expected {} by {difference}", self.expected));
        Ok(Outcome::Refuted)
    }
}
