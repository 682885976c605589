use qed_sym::{Expr, Oracle};

use super::{AttemptContext, Outcome, Strategy, StrategyFault};
use crate::method::ProofMethod;

/// Sequences two caller-supplied probes: `P(start)` and `P(k) => P(k + 1)`.
///
/// The probes are opaque; the strategy only records their verdicts.
pub struct Induction<B, S> {
    base_case: B,
    inductive_step: S,
}

impl<B, S> Induction<B, S>
where
    B: Fn() -> Result<bool, StrategyFault>,
    S: Fn() -> Result<bool, StrategyFault>,
{
    /// Strategy over the two probes.
    pub fn new(base_case: B, inductive_step: S) -> Self {
        Self {
            base_case,
            inductive_step,
        }
    }
}

impl<B, S> Strategy for Induction<B, S>
where
    B: Fn() -> Result<bool, StrategyFault>,
    S: Fn() -> Result<bool, StrategyFault>,
{
    fn method(&self) -> ProofMethod {
        ProofMethod::Induction
    }

    fn attempt(&self, cx: &mut AttemptContext<'_>) -> Result<Outcome, StrategyFault> {
        if !(self.base_case)()? {
            cx.step("base case failed");
            return Ok(Outcome::Refuted);
        }
        cx.step("base case verified");
        if !(self.inductive_step)()? {
            cx.step("inductive step failed");
            return Ok(Outcome::Refuted);
        }
        cx.step("inductive step verified");
        cx.step(format!(
            "by induction: {}",
            cx.obligation().conclusion()
        ));
        Ok(Outcome::Proven)
    }
}

/// Probes for `sum_{k=start}^{n} term(k) = closed_form(n)`.
///
/// The base case checks `closed_form(start) = term(start)`; the step checks
/// `closed_form(n + 1) - closed_form(n) = term(n + 1)` symbolically in `n`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummationInduction {
    variable: String,
    term: Expr,
    closed_form: Expr,
    start: i64,
}

impl SummationInduction {
    /// Summation of `term` from `start` to `variable` with the claimed closed form.
    pub fn new(variable: impl Into<String>, term: Expr, closed_form: Expr, start: i64) -> Self {
        Self {
            variable: variable.into(),
            term,
            closed_form,
            start,
        }
    }

    fn at(&self, expr: &Expr, value: Expr) -> Expr {
        expr.substitute(&self.variable, &value)
    }

    /// `P(start)`.
    pub fn base_case(&self, oracle: &dyn Oracle) -> Result<bool, StrategyFault> {
        let start = Expr::int(self.start);
        let difference = self.at(&self.closed_form, start.clone()) - self.at(&self.term, start);
        Ok(oracle.is_zero(&difference)?)
    }

    /// `P(n) => P(n + 1)`.
    pub fn inductive_step(&self, oracle: &dyn Oracle) -> Result<bool, StrategyFault> {
        let n = Expr::sym(self.variable.clone());
        let next = n.clone() + Expr::one();
        let difference = self.at(&self.closed_form, next.clone())
            - self.closed_form.clone()
            - self.at(&self.term, next);
        Ok(oracle.is_zero(&difference)?)
    }
}
