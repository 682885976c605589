use serde::{Deserialize, Serialize};

use crate::claim::Claim;
use crate::status::ProofStatus;

/// A claim awaiting verification together with its derivation log.
///
/// A fresh obligation is `Unknown` with an empty log. Only the verifier
/// changes the status; the log is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofObligation {
    name: String,
    hypothesis: Claim,
    conclusion: Claim,
    proof_method: String,
    #[serde(default)]
    status: ProofStatus,
    #[serde(default)]
    proof_steps: Vec<String>,
}

impl ProofObligation {
    /// Creates an unverified obligation.
    pub fn new(
        name: impl Into<String>,
        hypothesis: impl Into<Claim>,
        conclusion: impl Into<Claim>,
        proof_method: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            hypothesis: hypothesis.into(),
            conclusion: conclusion.into(),
            proof_method: proof_method.into(),
            status: ProofStatus::Unknown,
            proof_steps: Vec::new(),
        }
    }

    /// Human readable identifier.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Hypothesis claim.
    pub fn hypothesis(&self) -> &Claim {
        &self.hypothesis
    }

    /// Conclusion claim.
    pub fn conclusion(&self) -> &Claim {
        &self.conclusion
    }

    /// Advisory label naming the intended strategy.
    pub fn proof_method(&self) -> &str {
        &self.proof_method
    }

    /// Current verification status.
    pub fn status(&self) -> ProofStatus {
        self.status
    }

    /// Derivation log in the order steps were recorded.
    pub fn proof_steps(&self) -> &[String] {
        &self.proof_steps
    }

    /// Copy with both claims rewritten by `f`; status and log are kept.
    pub fn try_map_claims<E>(&self, f: impl Fn(&Claim) -> Result<Claim, E>) -> Result<Self, E> {
        Ok(Self {
            hypothesis: f(&self.hypothesis)?,
            conclusion: f(&self.conclusion)?,
            ..self.clone()
        })
    }

    pub(crate) fn record(&mut self, status: ProofStatus, steps: Vec<String>) {
        self.status = status;
        self.proof_steps.extend(steps);
    }
}
