use qed_sym::Oracle;

use super::{AttemptContext, Outcome, Strategy, StrategyFault};
use crate::claim::Claim;
use crate::method::ProofMethod;

/// Proves the conclusion by deriving a contradiction from an assumption.
///
/// A predicate that finds no contradiction leaves the obligation
/// inconclusive, never refuted.
pub struct Contradiction<P> {
    assumption: Claim,
    leads_to_contradiction: P,
}

impl<P> Contradiction<P>
where
    P: Fn(&Claim) -> Result<bool, StrategyFault>,
{
    /// Strategy over the assumption and its predicate.
    pub fn new(assumption: Claim, leads_to_contradiction: P) -> Self {
        Self {
            assumption,
            leads_to_contradiction,
        }
    }
}

impl<P> Strategy for Contradiction<P>
where
    P: Fn(&Claim) -> Result<bool, StrategyFault>,
{
    fn method(&self) -> ProofMethod {
        ProofMethod::Contradiction
    }

    fn attempt(&self, cx: &mut AttemptContext<'_>) -> Result<Outcome, StrategyFault> {
        cx.step(format!("assume {}", self.assumption));
        if (self.leads_to_contradiction)(&self.assumption)? {
            cx.step("contradiction derived");
            cx.step(format!("therefore {}", cx.obligation().conclusion()));
            Ok(Outcome::Proven)
        } else {
            cx.step("no contradiction derived; claim remains open");
            Ok(Outcome::Inconclusive)
        }
    }
}

/// Predicate for equation assumptions: `lhs = rhs` is contradictory when
/// `lhs - rhs` simplifies to a nonzero constant.
pub fn residual_contradiction(oracle: &dyn Oracle, assumption: &Claim) -> Result<bool, StrategyFault> {
    let Claim::Equation { lhs, rhs } = assumption else {
        return Err(StrategyFault::Claim(format!(
            "assumption `{assumption}` is not an equation"
        )));
    };
    let residual = oracle.simplify(&(lhs.clone() - rhs.clone()))?;
    Ok(oracle.is_constant(&residual)? && !oracle.is_zero(&residual)?)
}
