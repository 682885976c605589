//! Verification strategies behind one capability trait.
//!
//! A strategy only reads the obligation and records steps into an
//! [`AttemptContext`]; the verifier owns status changes and turns every
//! fault into an inconclusive verdict.

mod calculus;
/// Proof by contradiction and the residual contradiction helper.
pub mod contradiction;
/// Proof by induction and the summation probe builder.
pub mod induction;
mod simplification;

use qed_sym::{Expr, Oracle, SymbolicError};
use thiserror::Error;

use crate::claim::Claim;
use crate::method::ProofMethod;
use crate::obligation::ProofObligation;
use crate::status::ProofStatus;

pub use calculus::{DerivativeEquality, IntegralEquality, LimitEquality};
pub use contradiction::Contradiction;
pub use induction::Induction;
pub use simplification::Simplification;

/// Result of a completed strategy attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The claim holds.
    Proven,
    /// The claim was disproved.
    Refuted,
    /// The attempt could not decide the claim.
    Inconclusive,
}

impl Outcome {
    /// Status the verifier records for this outcome.
    pub fn status(self) -> ProofStatus {
        match self {
            Outcome::Proven => ProofStatus::Proven,
            Outcome::Refuted => ProofStatus::Refuted,
            Outcome::Inconclusive => ProofStatus::Unknown,
        }
    }
}

/// Reason a strategy attempt could not run to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StrategyFault {
    /// The oracle rejected an operation.
    #[error("oracle error: {0}")]
    Oracle(#[from] SymbolicError),
    /// A caller-supplied probe failed.
    #[error("probe error: {0}")]
    Probe(String),
    /// The obligation does not carry the inputs the strategy needs.
    #[error("malformed claim: {0}")]
    Claim(String),
}

impl StrategyFault {
    /// Probe failure with a message.
    pub fn probe(message: impl Into<String>) -> Self {
        StrategyFault::Probe(message.into())
    }
}

/// Read-only view of the obligation plus the step log of one attempt.
pub struct AttemptContext<'a> {
    obligation: &'a ProofObligation,
    oracle: &'a dyn Oracle,
    steps: Vec<String>,
}

impl<'a> AttemptContext<'a> {
    pub(crate) fn new(obligation: &'a ProofObligation, oracle: &'a dyn Oracle) -> Self {
        Self {
            obligation,
            oracle,
            steps: Vec::new(),
        }
    }

    /// Obligation under verification.
    pub fn obligation(&self) -> &'a ProofObligation {
        self.obligation
    }

    /// Oracle available to the attempt.
    pub fn oracle(&self) -> &'a dyn Oracle {
        self.oracle
    }

    /// Appends a derivation step.
    pub fn step(&mut self, step: impl Into<String>) {
        self.steps.push(step.into());
    }

    /// Steps recorded so far.
    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub(crate) fn into_steps(self) -> Vec<String> {
        self.steps
    }

    /// The hypothesis as an expression, or a fault naming the obligation.
    pub fn hypothesis_expr(&self) -> Result<&'a Expr, StrategyFault> {
        expect_expr(self.obligation.hypothesis(), "hypothesis")
    }

    /// The conclusion as an expression, or a fault naming the obligation.
    pub fn conclusion_expr(&self) -> Result<&'a Expr, StrategyFault> {
        expect_expr(self.obligation.conclusion(), "conclusion")
    }
}

fn expect_expr<'c>(claim: &'c Claim, role: &str) -> Result<&'c Expr, StrategyFault> {
    claim
        .as_expr()
        .ok_or_else(|| StrategyFault::Claim(format!("{role} `{claim}` is not a symbolic expression")))
}

/// One way of discharging an obligation.
pub trait Strategy {
    /// Method this strategy implements.
    fn method(&self) -> ProofMethod;

    /// Runs the strategy, recording steps into `cx`.
    fn attempt(&self, cx: &mut AttemptContext<'_>) -> Result<Outcome, StrategyFault>;
}

/// `simplify(computed - expected)` and whether it is the literal zero.
pub(crate) fn residual(
    oracle: &dyn Oracle,
    computed: &Expr,
    expected: &Expr,
) -> Result<(Expr, bool), StrategyFault> {
    let residual = oracle.simplify(&(computed.clone() - expected.clone()))?;
    let zero = residual.is_literal_zero();
    Ok((residual, zero))
}
