use super::{AttemptContext, Outcome, Strategy, StrategyFault};
use crate::method::ProofMethod;

/// Proves `hypothesis = conclusion` by reducing their difference to zero.
///
/// The residual is tried in simplified, expanded and factored form, in that
/// order; a single normal form is not trusted to expose every zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct Simplification;

impl Strategy for Simplification {
    fn method(&self) -> ProofMethod {
        ProofMethod::Simplification
    }

    fn attempt(&self, cx: &mut AttemptContext<'_>) -> Result<Outcome, StrategyFault> {
        let hypothesis = cx.hypothesis_expr()?;
        let conclusion = cx.conclusion_expr()?;
        let oracle = cx.oracle();
        let difference = hypothesis.clone() - conclusion.clone();

        let simplified = oracle.simplify(&difference)?;
        cx.step(format!("simplify(({hypothesis}) - ({conclusion})) = {simplified}"));
        if simplified.is_literal_zero() {
            cx.step(format!("{hypothesis} = {conclusion}"));
            return Ok(Outcome::Proven);
        }

        let expanded = oracle.expand(&simplified)?;
        if expanded.is_literal_zero() {
            cx.step(format!("expand({simplified}) = 0"));
            cx.step(format!("{hypothesis} = {conclusion}"));
            return Ok(Outcome::Proven);
        }

        let factored = oracle.factor(&simplified)?;
        if factored.is_literal_zero() {
            cx.step(format!("factor({simplified}) = 0"));
            cx.step(format!("{hypothesis} = {conclusion}"));
            return Ok(Outcome::Proven);
        }

        cx.step(format!("residual {factored} does not reduce to zero"));
        Ok(Outcome::Refuted)
    }
}
